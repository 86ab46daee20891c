//! AutoDJ (skywave-dj) - Main entry point
//!
//! Runs the queue scheduling engine against the in-memory reference
//! collaborators: each configured station gets a rotation library, a
//! continuously replenished queue, and a scheduling loop that airs the
//! resolved track whenever the current one reaches its crossfade point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skywave_common::config::{resolve_config_path, TomlConfig};
use skywave_common::model::{PlayingTrack, Station};
use skywave_common::time;
use skywave_dj::annotate::MetadataAnnotator;
use skywave_dj::engine::AutoDj;
use skywave_dj::history::{HistoryReader, MemoryHistory};
use skywave_dj::selector::RotationSelector;
use skywave_dj::store::MemoryQueueStore;
use skywave_dj::timeline;

/// Command-line arguments for skywave-dj
#[derive(Parser, Debug)]
#[command(name = "skywave-dj")]
#[command(about = "AutoDJ queue scheduling service for Skywave")]
#[command(version)]
struct Args {
    /// Path to the TOML config file (falls back to SKYWAVE_CONFIG, then
    /// ./skywave.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between scheduling ticks
    #[arg(short, long, default_value = "1")]
    interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = TomlConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    init_tracing(&config)?;

    if config_path.exists() {
        info!(config = %config_path.display(), "Loaded configuration");
    } else {
        warn!(
            config = %config_path.display(),
            "Config file not found; running with built-in defaults"
        );
    }

    if config.stations.is_empty() {
        warn!("No stations configured; nothing to schedule");
        return Ok(());
    }

    // Wire the engine to the in-memory reference collaborators
    let history = Arc::new(MemoryHistory::new());
    let store = Arc::new(MemoryQueueStore::new());
    let selector = Arc::new(RotationSelector::new());

    let mut stations: Vec<Station> = Vec::new();
    for station_config in &config.stations {
        let station = station_config.to_station();
        selector.add_station(station.id, &station_config.library).await;
        info!(
            station = %station.name,
            timezone = %station.timezone,
            crossfade = station.crossfade_duration,
            queue_length = station.queue_length,
            library_tracks = station_config.library.len(),
            "Configured station"
        );
        stations.push(station);
    }

    let dj = AutoDj::new(
        history.clone(),
        store,
        selector,
        Arc::new(MetadataAnnotator::new()),
    );

    // Prime every queue before the first tick
    for station in &stations {
        dj.build_queue(station)
            .await
            .with_context(|| format!("Failed to build initial queue for {}", station.name))?;
    }
    info!("Initial queues built; starting scheduling loop");

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));
    loop {
        tokio::select! {
            _ = shutdown_signal() => {
                info!("Shutdown signal received; stopping scheduling loop");
                break;
            }
            _ = ticker.tick() => {
                for station in &stations {
                    if let Err(e) = tick_station(&dj, &history, station).await {
                        error!(station = %station.name, error = %e, "Scheduling tick failed");
                    }
                }
            }
        }
    }

    info!("Scheduler shutdown complete");
    Ok(())
}

/// Initialize tracing from the config's logging section.
///
/// RUST_LOG still wins when set, matching the other Skywave services.
fn init_tracing(config: &TomlConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "skywave_dj={level},skywave_common={level}",
            level = config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
        None => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}

/// One scheduling tick for one station.
///
/// Waits until the airing track reaches its crossfade point, then resolves
/// the next entry, records it as airing, and tops the queue back up.
async fn tick_station(
    dj: &AutoDj,
    history: &MemoryHistory,
    station: &Station,
) -> skywave_dj::Result<()> {
    let now = time::now();

    if let Some(current) = history.current(station).await? {
        let next_start = timeline::advance(
            current.started_at,
            current.duration,
            station.crossfade_duration,
        );
        if now < next_start {
            return Ok(());
        }
    }

    match dj.next_song(station, true).await? {
        Some(cued) => {
            info!(
                station = %station.name,
                track = %cued.entry.title,
                annotation = %cued.annotation,
                "Starting next track"
            );
            history
                .set_current(
                    station.id,
                    PlayingTrack {
                        track_id: cued.entry.track_id,
                        title: cued.entry.title.clone(),
                        started_at: now,
                        duration: cued.entry.duration,
                    },
                )
                .await;

            // Consuming the head opened a slot; refill straight away
            dj.build_queue(station).await?;
        }
        None => {
            warn!(station = %station.name, "No track resolved; one cycle of silence");
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
