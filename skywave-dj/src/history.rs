//! Play-history collaborator
//!
//! The engine only ever asks one question of history: what is on the air
//! right now? The answer drives "now" reconstruction and repeat detection.

use crate::error::Result;
use async_trait::async_trait;
use skywave_common::model::{PlayingTrack, Station};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Read-only view of a station's play history
#[async_trait]
pub trait HistoryReader: Send + Sync {
    /// The track whose play window includes "now", or None when the
    /// station is silent
    async fn current(&self, station: &Station) -> Result<Option<PlayingTrack>>;
}

/// In-memory history, one current-track slot per station
///
/// The demo binary writes this as it "airs" tracks; tests use it to stage
/// repeat and now-floor scenarios.
#[derive(Default)]
pub struct MemoryHistory {
    current: RwLock<HashMap<Uuid, PlayingTrack>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the track now on air for a station
    pub async fn set_current(&self, station_id: Uuid, track: PlayingTrack) {
        self.current.write().await.insert(station_id, track);
    }

    /// Mark a station silent
    pub async fn clear(&self, station_id: Uuid) {
        self.current.write().await.remove(&station_id);
    }
}

#[async_trait]
impl HistoryReader for MemoryHistory {
    async fn current(&self, station: &Station) -> Result<Option<PlayingTrack>> {
        Ok(self.current.read().await.get(&station.id).cloned())
    }
}
