//! Queue refill operations
//!
//! **Responsibilities:**
//! - Rebuilding a station's queue up to its target depth
//! - Re-deriving the scheduling clock from entries already queued
//! - Resync mode: re-timestamping the whole queue after a manual skip
//! - Duplicate cleanup after every pass

use super::core::AutoDj;
use crate::error::Result;
use crate::timeline;
use chrono::{DateTime, Utc};
use skywave_common::model::{QueueEntry, Station};
use tracing::{debug, info};

impl AutoDj {
    /// Refill a station's queue to its target depth.
    ///
    /// Idempotent per call: an already-full queue only has its cued
    /// timestamps walked and its duplicates cleaned. Passes for the same
    /// station are serialized; a second caller blocks until the first
    /// pass finishes.
    pub async fn build_queue(&self, station: &Station) -> Result<()> {
        let guard = self.station_guard(station.id).await;
        let _pass = guard.lock().await;

        self.build_queue_locked(station, false).await
    }

    /// Rebuild with cued-timestamp reset: every existing entry is
    /// re-timestamped from the scheduling clock before new slots are
    /// filled. Used when the whole queue must time-shift, e.g. after a
    /// manual skip cut the current track short.
    pub async fn resync_queue(&self, station: &Station) -> Result<()> {
        let guard = self.station_guard(station.id).await;
        let _pass = guard.lock().await;

        info!(station = %station.name, "Resyncing queue timestamps");
        self.build_queue_locked(station, true).await
    }

    /// Refill pass body. Caller must hold the station's pass guard.
    pub(super) async fn build_queue_locked(
        &self,
        station: &Station,
        reset_cued: bool,
    ) -> Result<()> {
        let mut now = self.now_for_station(station).await?;

        let upcoming = self.queue.upcoming(station).await?;
        let mut queue_length = upcoming.len();

        // Walk the existing queue to find the clock floor for new slots.
        // When the queue has entries, their cued instants are a better
        // basis than the caller's clock: the queue stays full if a row is
        // appended every time one is consumed, so the tail is where the
        // schedule actually ends.
        for entry in &upcoming {
            let cued_at = if reset_cued {
                self.queue.set_cued_at(entry.id, now).await?;
                now
            } else {
                entry.cued_at
            };
            now = timeline::advance(cued_at, entry.duration, station.crossfade_duration);
        }

        while queue_length < station.queue_length {
            match self.cue_next_track(station, now).await? {
                Some(next_now) => {
                    now = next_now;
                    queue_length += 1;
                }
                None => {
                    // Selection exhausted for this pass; a later pass
                    // retries. The queue simply stays under target depth.
                    info!(
                        station = %station.name,
                        queue_length,
                        target = station.queue_length,
                        "Selector returned no track; stopping refill early"
                    );
                    break;
                }
            }
        }

        let removed = self.queue.remove_duplicates(station).await?;
        if removed > 0 {
            info!(
                station = %station.name,
                removed,
                "Removed redundant queue entries"
            );
        }

        Ok(())
    }

    /// Fill one queue slot at `now`. Returns the cue instant for the slot
    /// after it, or None when the selector has nothing to offer.
    async fn cue_next_track(
        &self,
        station: &Station,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        debug!(station = %station.name, %now, "Adding to station queue");

        let Some(selected) = self.selector.select(station, now).await? else {
            return Ok(None);
        };

        // The selector's trace travels with the entry it produced
        let entry = QueueEntry::from_selection(station, selected, now);
        let duration = entry.duration;

        debug!(
            station = %station.name,
            track = %entry.title,
            cued_at = %entry.cued_at,
            "Cued track"
        );

        self.queue.append(entry).await?;

        Ok(Some(timeline::advance(
            now,
            duration,
            station.crossfade_duration,
        )))
    }
}
