//! Playback annotation collaborator
//!
//! The resolver hands the winning queue entry to an annotator, which
//! produces the metadata string the playback backend consumes. Annotation
//! formatting is deliberately outside the scheduling core; the trait keeps
//! it swappable per backend.

use crate::error::{Error, Result};
use async_trait::async_trait;
use skywave_common::model::QueueEntry;

/// Produces the final metadata/announcement string for a resolved entry.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// `as_autodj` marks entries cued by the automation rather than an
    /// operator; backends use it to tag automated transitions.
    async fn annotate(&self, entry: &QueueEntry, as_autodj: bool) -> Result<String>;
}

/// Key/value annotation format: `annotate:key="value",...`
///
/// Values are JSON-string quoted so titles containing quotes or commas
/// survive the trip through the backend's parser.
pub struct MetadataAnnotator;

impl MetadataAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn quote(value: &str) -> Result<String> {
        serde_json::to_string(value)
            .map_err(|e| Error::Annotation(format!("Failed to quote value: {}", e)))
    }
}

impl Default for MetadataAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Annotator for MetadataAnnotator {
    async fn annotate(&self, entry: &QueueEntry, as_autodj: bool) -> Result<String> {
        let mut pairs = vec![
            format!("track_id={}", Self::quote(&entry.track_id.to_string())?),
            format!("title={}", Self::quote(&entry.title)?),
            format!("artist={}", Self::quote(&entry.artist)?),
        ];

        if let Some(duration) = entry.duration {
            pairs.push(format!("duration={}", Self::quote(&duration.to_string())?));
        }

        if as_autodj {
            pairs.push("autodj_next=\"true\"".to_string());
        }

        Ok(format!("annotate:{}", pairs.join(",")))
    }
}
