//! Error types for skywave-dj
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Scheduling-level recoveries (empty queue, repeated head,
//! exhausted selector) are not errors; see the engine module.

use thiserror::Error;

/// Main error type for the skywave-dj module
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Queue store errors
    #[error("Queue error: {0}")]
    Queue(String),

    /// Track selection errors
    #[error("Selection error: {0}")]
    Selection(String),

    /// Annotation errors
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Play-history errors
    #[error("History error: {0}")]
    History(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using skywave-dj Error
pub type Result<T> = std::result::Result<T, Error>;
