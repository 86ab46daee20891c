//! Shared fixtures and stub collaborators for engine tests

// Not every test binary uses every stub
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use skywave_common::model::{QueueEntry, SelectedTrack, Station};
use skywave_dj::annotate::MetadataAnnotator;
use skywave_dj::engine::AutoDj;
use skywave_dj::error::Result;
use skywave_dj::history::MemoryHistory;
use skywave_dj::selector::TrackSelector;
use skywave_dj::store::MemoryQueueStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub fn station(crossfade: f64, queue_length: usize) -> Station {
    Station {
        id: Uuid::new_v4(),
        name: "Test FM".to_string(),
        timezone: "UTC".to_string(),
        crossfade_duration: crossfade,
        queue_length,
    }
}

/// Engine wired to the given stubs plus the standard annotator
pub fn engine(
    history: Arc<MemoryHistory>,
    store: Arc<MemoryQueueStore>,
    selector: Arc<dyn TrackSelector>,
) -> AutoDj {
    AutoDj::new(history, store, selector, Arc::new(MetadataAnnotator::new()))
}

/// Queue entry fixture for pre-seeding stores
pub fn entry(
    station: &Station,
    track_id: Uuid,
    title: &str,
    cued_at: DateTime<Utc>,
    duration: Option<i64>,
) -> QueueEntry {
    QueueEntry::from_selection(
        station,
        SelectedTrack {
            track_id,
            title: title.to_string(),
            artist: "Fixture".to_string(),
            duration,
            trace: vec!["seeded by test fixture".to_string()],
        },
        cued_at,
    )
}

pub fn past(secs: i64) -> DateTime<Utc> {
    Utc::now() - Duration::seconds(secs)
}

/// Selector producing an endless stream of distinct tracks with a fixed
/// duration
pub struct EndlessSelector {
    duration: i64,
    calls: AtomicUsize,
}

impl EndlessSelector {
    pub fn new(duration: i64) -> Self {
        Self {
            duration,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackSelector for EndlessSelector {
    async fn select(
        &self,
        _station: &Station,
        target: DateTime<Utc>,
    ) -> Result<Option<SelectedTrack>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Some(SelectedTrack {
            track_id: Uuid::new_v4(),
            title: format!("endless track {n}"),
            artist: "Stub".to_string(),
            duration: Some(self.duration),
            trace: vec![format!("stub selection for {target}")],
        }))
    }
}

/// Selector with a finite supply; returns None once it runs dry
pub struct LimitedSelector {
    supply: usize,
    duration: i64,
    calls: AtomicUsize,
}

impl LimitedSelector {
    pub fn new(supply: usize, duration: i64) -> Self {
        Self {
            supply,
            duration,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackSelector for LimitedSelector {
    async fn select(
        &self,
        _station: &Station,
        target: DateTime<Utc>,
    ) -> Result<Option<SelectedTrack>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n > self.supply {
            return Ok(None);
        }
        Ok(Some(SelectedTrack {
            track_id: Uuid::new_v4(),
            title: format!("limited track {n}"),
            artist: "Stub".to_string(),
            duration: Some(self.duration),
            trace: vec![format!("stub selection for {target}")],
        }))
    }
}

/// Selector that always offers the same track
pub struct RepeatSelector {
    track_id: Uuid,
    duration: i64,
    calls: AtomicUsize,
}

impl RepeatSelector {
    pub fn new(track_id: Uuid, duration: i64) -> Self {
        Self {
            track_id,
            duration,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackSelector for RepeatSelector {
    async fn select(
        &self,
        _station: &Station,
        target: DateTime<Utc>,
    ) -> Result<Option<SelectedTrack>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(SelectedTrack {
            track_id: self.track_id,
            title: "stuck record".to_string(),
            artist: "Stub".to_string(),
            duration: Some(self.duration),
            trace: vec![format!("stub selection for {target}")],
        }))
    }
}

/// Selector that fails the test if the engine ever consults it
pub struct NeverSelector;

#[async_trait]
impl TrackSelector for NeverSelector {
    async fn select(
        &self,
        _station: &Station,
        _target: DateTime<Utc>,
    ) -> Result<Option<SelectedTrack>> {
        panic!("selector must not be invoked in this scenario");
    }
}
