//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Score window length
//! - Recent-days display options
//!
//! Configuration is stored at `~/.config/habits/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{data_dir, StorageError};
use crate::score::DEFAULT_WINDOW_DAYS;

/// Score-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Trailing window length in days. Must be at least 1.
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

/// Display configuration for the recent-days row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show oldest dates first instead of today first.
    #[serde(default)]
    pub dates_appear_reversed: bool,
    /// How many recent days the list shows.
    #[serde(default = "default_recent_days")]
    pub recent_days: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habits/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}

fn default_recent_days() -> usize {
    5
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dates_appear_reversed: false,
            recent_days: default_recent_days(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            score: ScoreConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, StorageError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when
    /// the file does not exist yet.
    pub fn load() -> Result<Self, StorageError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|err| StorageError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), StorageError> {
        self.save_to(&Self::path()?)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        self.validate()?;
        let raw = toml::to_string_pretty(self).map_err(|err| StorageError::Serialize {
            what: "config",
            message: err.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), StorageError> {
        if self.score.window_days == 0 {
            return Err(StorageError::InvalidConfig {
                key: "score.window_days",
                message: "must be at least 1".to_string(),
            });
        }
        if self.display.recent_days == 0 {
            return Err(StorageError::InvalidConfig {
                key: "display.recent_days",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
