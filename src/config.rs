//! Configuration file handling.
//!
//! Settings live in `<config dir>/replay-driver/config.toml`. Every field is
//! optional; missing fields fall back to their defaults and command-line
//! flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::replay::SyntheticConfig;

/// Directory name under the platform config dir.
const APP_DIR: &str = "replay-driver";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub synthetic: SyntheticSection,
    pub log: LogConfig,
}

/// Run-loop behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Pause after this frame has been replayed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_frame: Option<u32>,
    pub quit_after_range: bool,
    pub flush_measurement_range: bool,
    /// Never read keyboard input
    pub headless: bool,
}

/// Shape of the synthetic workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSection {
    pub frames: u32,
    pub decode_time_ms: u64,
    pub gpu_time_ms: u64,
    pub max_frames_in_flight: usize,
}

impl Default for SyntheticSection {
    fn default() -> Self {
        let defaults = SyntheticConfig::default();
        Self {
            frames: defaults.frames,
            decode_time_ms: defaults.decode_time.as_millis() as u64,
            gpu_time_ms: defaults.gpu_time.as_millis() as u64,
            max_frames_in_flight: defaults.max_frames_in_flight,
        }
    }
}

impl SyntheticSection {
    pub fn to_engine_config(&self) -> SyntheticConfig {
        SyntheticConfig {
            frames: self.frames,
            decode_time: Duration::from_millis(self.decode_time_ms),
            gpu_time: Duration::from_millis(self.gpu_time_ms),
            max_frames_in_flight: self.max_frames_in_flight,
            fail_at_frame: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when no log environment variable is set
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default config file location.
    ///
    /// # Errors
    /// Fails if the platform has no config directory.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, or defaults if the file is missing.
    ///
    /// # Errors
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, or defaults if the file is missing.
    ///
    /// # Errors
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
