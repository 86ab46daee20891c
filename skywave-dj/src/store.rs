//! Queue store collaborator
//!
//! The engine owns all queue mutation through this trait: the builder
//! appends, re-timestamps and deduplicates; the resolver removes. Durable
//! persistence lives outside this crate; `MemoryQueueStore` is the
//! reference implementation used by the demo binary and the test suite.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skywave_common::model::{QueueEntry, Station};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Per-station upcoming-queue storage.
///
/// Implementations must return entries in cued-start order, and keep that
/// order across `append` and `set_cued_at`.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Next entry scheduled to play, if any
    async fn head(&self, station: &Station) -> Result<Option<QueueEntry>>;

    /// All not-yet-played entries in cued-start order
    async fn upcoming(&self, station: &Station) -> Result<Vec<QueueEntry>>;

    /// Add a new entry to its station's queue
    async fn append(&self, entry: QueueEntry) -> Result<()>;

    /// Remove one entry by id
    async fn remove(&self, entry_id: Uuid) -> Result<()>;

    /// Overwrite an entry's cued-start instant (queue resync support)
    async fn set_cued_at(&self, entry_id: Uuid, cued_at: DateTime<Utc>) -> Result<()>;

    /// Drop entries that would play redundantly; returns how many were
    /// removed. Policy: consecutive entries sharing a track id collapse to
    /// the earliest one. Calling this twice in a row removes nothing the
    /// second time.
    async fn remove_duplicates(&self, station: &Station) -> Result<usize>;
}

/// In-memory queue store, one ordered list per station
#[derive(Default)]
pub struct MemoryQueueStore {
    queues: RwLock<HashMap<Uuid, Vec<QueueEntry>>>,
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sort_queue(queue: &mut Vec<QueueEntry>) {
        // Stable sort: entries sharing an instant keep insertion order
        queue.sort_by_key(|entry| entry.cued_at);
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn head(&self, station: &Station) -> Result<Option<QueueEntry>> {
        let queues = self.queues.read().await;
        Ok(queues
            .get(&station.id)
            .and_then(|queue| queue.first())
            .cloned())
    }

    async fn upcoming(&self, station: &Station) -> Result<Vec<QueueEntry>> {
        let queues = self.queues.read().await;
        Ok(queues.get(&station.id).cloned().unwrap_or_default())
    }

    async fn append(&self, entry: QueueEntry) -> Result<()> {
        let mut queues = self.queues.write().await;
        let queue = queues.entry(entry.station_id).or_default();
        queue.push(entry);
        Self::sort_queue(queue);
        Ok(())
    }

    async fn remove(&self, entry_id: Uuid) -> Result<()> {
        let mut queues = self.queues.write().await;
        for queue in queues.values_mut() {
            if let Some(index) = queue.iter().position(|e| e.id == entry_id) {
                queue.remove(index);
                return Ok(());
            }
        }
        Err(Error::Queue(format!("Queue entry not found: {}", entry_id)))
    }

    async fn set_cued_at(&self, entry_id: Uuid, cued_at: DateTime<Utc>) -> Result<()> {
        let mut queues = self.queues.write().await;
        for queue in queues.values_mut() {
            if let Some(entry) = queue.iter_mut().find(|e| e.id == entry_id) {
                entry.cued_at = cued_at;
                Self::sort_queue(queue);
                return Ok(());
            }
        }
        Err(Error::Queue(format!("Queue entry not found: {}", entry_id)))
    }

    async fn remove_duplicates(&self, station: &Station) -> Result<usize> {
        let mut queues = self.queues.write().await;
        let Some(queue) = queues.get_mut(&station.id) else {
            return Ok(0);
        };

        let before = queue.len();
        queue.dedup_by(|later, earlier| later.track_id == earlier.track_id);
        Ok(before - queue.len())
    }
}
