//! Crossfade-aware cue time arithmetic
//!
//! Pure functions, no state, no I/O. All arithmetic is millisecond-exact:
//! crossfade durations carry sub-second offsets, so the subtraction is done
//! in milliseconds rather than whole seconds.

use chrono::{DateTime, Duration, Utc};

/// Track length assumed when a duration is unknown or non-positive.
///
/// One second guarantees forward progress: a queue full of unknown-length
/// tracks still advances the scheduling clock on every step.
pub const FALLBACK_DURATION_SECS: i64 = 1;

/// Compute the instant at which the next track should be cued.
///
/// A track longer than the crossfade window ends with its tail overlapping
/// the next track, so the next cue lands `duration - crossfade` after `now`.
/// Tracks shorter than the window are too short to crossfade against; the
/// next track starts right after them.
pub fn advance(now: DateTime<Utc>, duration: Option<i64>, crossfade: f64) -> DateTime<Utc> {
    let duration = effective_duration(duration);
    let end = now + Duration::seconds(duration);

    if (duration as f64) >= crossfade {
        end - Duration::milliseconds((crossfade * 1000.0) as i64)
    } else {
        end
    }
}

/// Normalize a stored duration: unknown or non-positive becomes the fallback.
pub fn effective_duration(duration: Option<i64>) -> i64 {
    match duration {
        Some(d) if d > 0 => d,
        _ => FALLBACK_DURATION_SECS,
    }
}
