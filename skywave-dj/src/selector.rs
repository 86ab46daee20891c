//! Track selection strategy hook
//!
//! Selection is an external concern: the engine asks for one track per
//! queue slot and does not care how it was chosen. The trait leaves room
//! for weighted playlists, dayparting or request integration without
//! touching the scheduling core. `RotationSelector` is the one concrete
//! implementation shipped here: a plain round-robin over each station's
//! configured library.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skywave_common::config::TrackConfig;
use skywave_common::model::{SelectedTrack, Station};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Chooses the track for one queue slot.
#[async_trait]
pub trait TrackSelector: Send + Sync {
    /// Pick a track to cue at `target`. None means selection is exhausted
    /// for this pass; the builder stops filling and retries on a later
    /// pass. Each call must also return the diagnostic trace explaining
    /// the decision; the engine attaches it to the queue entry it creates.
    async fn select(&self, station: &Station, target: DateTime<Utc>)
        -> Result<Option<SelectedTrack>>;
}

/// One track in a station's rotation
#[derive(Debug, Clone)]
struct RotationTrack {
    track_id: Uuid,
    title: String,
    artist: String,
    duration: Option<i64>,
}

#[derive(Debug, Default)]
struct Rotation {
    tracks: Vec<RotationTrack>,
    cursor: usize,
}

/// Round-robin selector over per-station track libraries
#[derive(Default)]
pub struct RotationSelector {
    rotations: Mutex<HashMap<Uuid, Rotation>>,
}

impl RotationSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station's library. Tracks keep config order; each gets a
    /// stable id for repeat detection across selections.
    pub async fn add_station(&self, station_id: Uuid, library: &[TrackConfig]) {
        let tracks = library
            .iter()
            .map(|track| RotationTrack {
                track_id: Uuid::new_v4(),
                title: track.title.clone(),
                artist: track.artist.clone(),
                duration: track.duration,
            })
            .collect();

        self.rotations
            .lock()
            .await
            .insert(station_id, Rotation { tracks, cursor: 0 });
    }
}

#[async_trait]
impl TrackSelector for RotationSelector {
    async fn select(
        &self,
        station: &Station,
        target: DateTime<Utc>,
    ) -> Result<Option<SelectedTrack>> {
        let mut rotations = self.rotations.lock().await;
        let Some(rotation) = rotations.get_mut(&station.id) else {
            return Ok(None);
        };
        if rotation.tracks.is_empty() {
            return Ok(None);
        }

        let position = rotation.cursor % rotation.tracks.len();
        let track = &rotation.tracks[position];
        rotation.cursor = position + 1;

        let trace = vec![
            format!("rotation: {} tracks in library", rotation.tracks.len()),
            format!("rotation: cursor at position {}", position),
            format!("rotation: cued \"{}\" for {}", track.title, target),
        ];

        Ok(Some(SelectedTrack {
            track_id: track.track_id,
            title: track.title.clone(),
            artist: track.artist.clone(),
            duration: track.duration,
            trace,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_station(id: Uuid) -> Station {
        Station {
            id,
            name: "Rotation FM".to_string(),
            timezone: "UTC".to_string(),
            crossfade_duration: 2.0,
            queue_length: 3,
        }
    }

    fn track(title: &str) -> TrackConfig {
        TrackConfig {
            title: title.to_string(),
            artist: "Test Artist".to_string(),
            duration: Some(180),
        }
    }

    #[tokio::test]
    async fn test_round_robin_wraps() {
        let selector = RotationSelector::new();
        let station = test_station(Uuid::new_v4());
        selector
            .add_station(station.id, &[track("one"), track("two")])
            .await;

        let now = Utc::now();
        let titles: Vec<String> = {
            let mut titles = Vec::new();
            for _ in 0..4 {
                let selected = selector.select(&station, now).await.unwrap().expect("track");
                titles.push(selected.title);
            }
            titles
        };
        assert_eq!(titles, vec!["one", "two", "one", "two"]);
    }

    #[tokio::test]
    async fn test_unknown_station_selects_nothing() {
        let selector = RotationSelector::new();
        let station = test_station(Uuid::new_v4());
        assert!(selector.select(&station, Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_library_selects_nothing() {
        let selector = RotationSelector::new();
        let station = test_station(Uuid::new_v4());
        selector.add_station(station.id, &[]).await;
        assert!(selector.select(&station, Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_selection_carries_trace() {
        let selector = RotationSelector::new();
        let station = test_station(Uuid::new_v4());
        selector.add_station(station.id, &[track("traced")]).await;

        let selected = selector
            .select(&station, Utc::now())
            .await
            .unwrap()
            .expect("track");
        assert!(!selected.trace.is_empty());
        assert!(selected.trace.iter().any(|line| line.contains("traced")));
    }
}
