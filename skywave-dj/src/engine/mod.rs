//! AutoDJ scheduling engine
//!
//! **Module Structure:**
//! - `core.rs`: AutoDj struct, per-station pass serialization, scheduling
//!   clock reconstruction
//! - `builder.rs`: queue refill (build, resync, per-slot cueing)
//! - `resolver.rs`: "what plays now" resolution with bounded retries

mod builder;
mod core;
mod resolver;

// Re-export the engine as public API
pub use self::core::AutoDj;
pub use self::resolver::CuedSong;
