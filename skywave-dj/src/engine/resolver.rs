//! Next-song resolution
//!
//! **Responsibilities:**
//! - Consuming the queue head when a track must start now
//! - Self-correction: rebuild on empty queue, discard needless repeats
//! - Bounding the retry loop so a persistent upstream problem degrades to
//!   one cycle of silence instead of a hang

use super::core::AutoDj;
use crate::error::Result;
use skywave_common::model::{QueueEntry, Station};
use tracing::{info, warn};

/// Resolution attempts per call: one to rebuild an empty queue, one to
/// skip a repeat, one to succeed. Needing a fourth means something
/// upstream is persistently wrong and retrying would loop forever.
const MAX_RESOLVE_ATTEMPTS: u32 = 3;

/// A resolved queue entry together with its annotation string.
#[derive(Debug, Clone)]
pub struct CuedSong {
    /// The consumed queue entry; the caller promotes it to history once
    /// playback actually starts
    pub entry: QueueEntry,

    /// Annotation produced by the annotator collaborator
    pub annotation: String,
}

impl AutoDj {
    /// Resolve the track that should start playing now.
    ///
    /// Pops the queue head, rebuilding first if the queue is empty and
    /// discarding heads that would replay the currently airing track.
    /// Returns None once the retry bound is hit: an operational warning,
    /// never an error, so the playback pipeline keeps running through one
    /// silent cycle.
    pub async fn next_song(&self, station: &Station, as_autodj: bool) -> Result<Option<CuedSong>> {
        let guard = self.station_guard(station.id).await;
        let _pass = guard.lock().await;

        for iteration in 1..=MAX_RESOLVE_ATTEMPTS {
            let Some(head) = self.queue.head(station).await? else {
                info!(
                    station = %station.name,
                    iteration,
                    "Queue is empty; rebuilding before attempting to get next song"
                );
                self.build_queue_locked(station, false).await?;
                continue;
            };

            // Never air the same track back to back
            if let Some(current) = self.history.current(station).await? {
                if current.track_id == head.track_id {
                    self.queue.remove(head.id).await?;
                    info!(
                        station = %station.name,
                        iteration,
                        track = %head.title,
                        "Queue would play the same song again; removing and retrying"
                    );
                    continue;
                }
            }

            // Head is good: consume it and hand it to the annotator
            self.queue.remove(head.id).await?;
            let annotation = self.annotator.annotate(&head, as_autodj).await?;

            return Ok(Some(CuedSong {
                entry: head,
                annotation,
            }));
        }

        warn!(
            station_id = %station.id,
            station = %station.name,
            attempts = MAX_RESOLVE_ATTEMPTS,
            "Too many attempts to get next song; giving up"
        );
        Ok(None)
    }

    /// String-level variant of [`next_song`](Self::next_song): the
    /// annotation on success, an empty string when resolution gave up.
    pub async fn annotate_next_song(&self, station: &Station, as_autodj: bool) -> Result<String> {
        Ok(self
            .next_song(station, as_autodj)
            .await?
            .map(|cued| cued.annotation)
            .unwrap_or_default())
    }
}
