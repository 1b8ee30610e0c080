//! Core error types for habits-core.

use thiserror::Error;

use crate::notify::NotifyError;
use crate::score::ScoreError;
use crate::storage::StorageError;

/// Core error type for habits-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Score computation errors
    #[error("Score error: {0}")]
    Score(#[from] ScoreError),

    /// Notification service errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
