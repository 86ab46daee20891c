//! Core AutoDJ engine - construction and scheduling clock
//!
//! **Responsibilities:**
//! - AutoDj struct definition and collaborator wiring
//! - Per-station pass serialization (one build/resolve pass at a time)
//! - Scheduling clock reconstruction from the currently airing track

use crate::annotate::Annotator;
use crate::error::Result;
use crate::history::HistoryReader;
use crate::selector::TrackSelector;
use crate::store::QueueStore;
use crate::timeline;
use chrono::{DateTime, Utc};
use skywave_common::model::Station;
use skywave_common::time;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// AutoDJ engine - keeps every station's queue replenished and resolves
/// the next track to air
///
/// All queue mutation flows through this engine; collaborators behind the
/// trait seams handle persistence, selection policy and annotation format.
pub struct AutoDj {
    /// Play history collaborator (currently airing track)
    pub(super) history: Arc<dyn HistoryReader>,

    /// Queue store collaborator (upcoming entries per station)
    pub(super) queue: Arc<dyn QueueStore>,

    /// Selection strategy hook, invoked once per queue slot
    pub(super) selector: Arc<dyn TrackSelector>,

    /// Annotation hook for resolved entries
    pub(super) annotator: Arc<dyn Annotator>,

    /// One pass guard per station; passes for different stations run
    /// independently
    station_guards: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl AutoDj {
    pub fn new(
        history: Arc<dyn HistoryReader>,
        queue: Arc<dyn QueueStore>,
        selector: Arc<dyn TrackSelector>,
        annotator: Arc<dyn Annotator>,
    ) -> Self {
        Self {
            history,
            queue,
            selector,
            annotator,
            station_guards: Mutex::new(HashMap::new()),
        }
    }

    /// Get the pass guard for a station, creating it on first use.
    ///
    /// Concurrent passes for the same station would double-fill slots and
    /// disagree about the scheduling clock; callers hold the returned lock
    /// for the duration of one pass.
    pub(super) async fn station_guard(&self, station_id: Uuid) -> Arc<Mutex<()>> {
        let mut guards = self.station_guards.lock().await;
        guards
            .entry(station_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Reconstruct the scheduling clock ("now") for a station.
    ///
    /// With nothing on air this is the wall clock. Otherwise it is the
    /// projected end of the current track (crossfade included) or the wall
    /// clock, whichever is later: the queue is never built in the past
    /// relative to what is already airing, and an automation that fell
    /// behind snaps forward to real time.
    pub async fn now_for_station(&self, station: &Station) -> Result<DateTime<Utc>> {
        let wall_now = time::now();

        let Some(current) = self.history.current(station).await? else {
            return Ok(wall_now);
        };

        let projected_end = timeline::advance(
            current.started_at,
            current.duration,
            station.crossfade_duration,
        );

        debug!(
            station = %station.name,
            track = %current.title,
            started = %current.started_at,
            duration = ?current.duration,
            "Deriving scheduling clock from currently playing track"
        );

        Ok(wall_now.max(projected_end))
    }
}
