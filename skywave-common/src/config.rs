//! Bootstrap configuration loading
//!
//! Skywave services read a small TOML bootstrap file describing logging and
//! the stations to run. Config file path priority:
//!
//! 1. Command-line argument (highest priority)
//! 2. `SKYWAVE_CONFIG` environment variable
//! 3. `skywave.toml` in the working directory (fallback)
//!
//! A missing config file is not fatal: services log a warning and start with
//! built-in defaults so a misplaced file never takes a station off the air.

use crate::error::{Error, Result};
use crate::model::Station;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Environment variable consulted when no config path is given on the CLI
pub const CONFIG_ENV_VAR: &str = "SKYWAVE_CONFIG";

/// Fallback config file name in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "skywave.toml";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime; restart to pick up edits.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Stations to schedule
    #[serde(default)]
    pub stations: Vec<StationConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Per-station scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    /// Display name
    pub name: String,

    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Crossfade overlap in seconds
    #[serde(default = "default_crossfade_duration")]
    pub crossfade_duration: f64,

    /// Target queue depth
    #[serde(default = "default_queue_length")]
    pub queue_length: usize,

    /// Rotation library for the built-in selector
    #[serde(default)]
    pub library: Vec<TrackConfig>,
}

/// One rotation-library track
#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    /// Track title
    pub title: String,

    /// Track artist
    #[serde(default)]
    pub artist: String,

    /// Track length in seconds; omit when unknown
    #[serde(default)]
    pub duration: Option<i64>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_crossfade_duration() -> f64 {
    2.0
}

fn default_queue_length() -> usize {
    3
}

impl StationConfig {
    /// Materialize a station with a fresh UUID.
    ///
    /// Negative crossfade values are clamped to zero rather than rejected.
    pub fn to_station(&self) -> Station {
        Station {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            timezone: self.timezone.clone(),
            crossfade_duration: self.crossfade_duration.max(0.0),
            queue_length: self.queue_length,
        }
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load configuration, degrading to built-in defaults when the file is
    /// missing. Parse errors are still surfaced: a malformed file is an
    /// operator mistake that silent defaults would hide.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                config = %path.display(),
                "Config file not found; starting with built-in defaults"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

/// Resolve the config file path following the documented priority order.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    // Priority 3: Working-directory fallback
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
