//! Domain model shared across Skywave services
//!
//! These are plain data types; all scheduling behavior lives in the
//! AutoDJ engine crate. Timestamps are UTC throughout; a station's IANA
//! timezone is carried for presentation (logs, UI) only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A broadcast station and its scheduling parameters.
///
/// Immutable for the duration of one scheduling pass; owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Station UUID
    pub id: Uuid,

    /// Display name (used in log context)
    pub name: String,

    /// IANA timezone name, e.g. "America/Chicago"
    pub timezone: String,

    /// Crossfade overlap in seconds (sub-second values allowed)
    pub crossfade_duration: f64,

    /// Target number of upcoming entries to keep pre-scheduled
    pub queue_length: usize,
}

/// A scheduled future playback slot in a station's queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Queue entry UUID
    pub id: Uuid,

    /// Owning station
    pub station_id: Uuid,

    /// Track identifier (shared with history records)
    pub track_id: Uuid,

    /// Track title, for annotation output
    pub title: String,

    /// Track artist, for annotation output
    pub artist: String,

    /// Track length in seconds; None when unknown
    pub duration: Option<i64>,

    /// Wall-clock instant this entry is scheduled to start
    pub cued_at: DateTime<Utc>,

    /// Diagnostic trace of how this entry was selected
    pub log: Vec<String>,
}

impl QueueEntry {
    /// Build a queue entry from a selector response at the given cue instant.
    pub fn from_selection(station: &Station, selected: SelectedTrack, cued_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            station_id: station.id,
            track_id: selected.track_id,
            title: selected.title,
            artist: selected.artist,
            duration: selected.duration,
            cued_at,
            log: selected.trace,
        }
    }
}

/// Read-only snapshot of the track currently on air.
///
/// Produced entirely by the history collaborator; the engine only uses it
/// to reconstruct "now" and to detect needless repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingTrack {
    /// Track identifier
    pub track_id: Uuid,

    /// Track title, for log context
    pub title: String,

    /// Instant the track actually started
    pub started_at: DateTime<Utc>,

    /// Track length in seconds; None when unknown
    pub duration: Option<i64>,
}

/// A track chosen by the selection strategy for one queue slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedTrack {
    /// Track identifier
    pub track_id: Uuid,

    /// Track title
    pub title: String,

    /// Track artist
    pub artist: String,

    /// Track length in seconds; None when unknown
    pub duration: Option<i64>,

    /// Diagnostic trace of the selection decision, attached to the
    /// queue entry it produces
    pub trace: Vec<String>,
}
