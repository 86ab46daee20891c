//! # Skywave AutoDJ (skywave-dj)
//!
//! Queue scheduling and time-advancement engine for the Skywave broadcast
//! automation suite. For each station it keeps a continuously replenished,
//! time-ordered playback queue: there is always a next track ready, it is
//! never a needless repeat of what is airing, and every cued start instant
//! accounts for crossfade overlap with the entry before it.
//!
//! Collaborators that live outside this crate (durable queue/history
//! persistence, the selection policy, annotation formatting) sit behind
//! trait seams ([`store::QueueStore`], [`history::HistoryReader`],
//! [`selector::TrackSelector`], [`annotate::Annotator`]); in-memory
//! reference implementations back the demo binary and the test suite.

pub mod annotate;
pub mod engine;
pub mod error;
pub mod history;
pub mod selector;
pub mod store;
pub mod timeline;

pub use engine::{AutoDj, CuedSong};
pub use error::{Error, Result};
