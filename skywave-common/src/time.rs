//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert whole seconds to a chrono duration
pub fn seconds(secs: i64) -> chrono::Duration {
    chrono::Duration::seconds(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_seconds_round_trip() {
        assert_eq!(seconds(180).num_seconds(), 180);
        assert_eq!(seconds(0).num_seconds(), 0);
        assert_eq!(seconds(-5).num_seconds(), -5);
    }
}
