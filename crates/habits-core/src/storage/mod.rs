mod config;
mod store;

pub use config::{Config, DisplayConfig, ScoreConfig};
pub use store::HabitStore;

use std::path::PathBuf;

use thiserror::Error;

/// Storage failures.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },

    #[error("invalid config value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },
}

/// Returns `~/.config/habits[-dev]/` based on HABITS_ENV.
///
/// Set HABITS_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habits-dev")
    } else {
        base_dir.join("habits")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
