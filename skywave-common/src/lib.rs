//! # Skywave Common Library
//!
//! Shared code for the Skywave broadcast automation services including:
//! - Domain model (stations, queue entries, playback snapshots)
//! - Bootstrap configuration loading
//! - Error types
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod model;
pub mod time;

pub use error::{Error, Result};
pub use model::{PlayingTrack, QueueEntry, SelectedTrack, Station};
