//! Seam to the platform notification service.
//!
//! The service is an explicit object injected into the [`Reconciler`],
//! not ambient global state; authorization is queried from it rather
//! than cached anywhere in this crate.
//!
//! [`Reconciler`]: super::Reconciler

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Platform permission to deliver notifications.
///
/// Restricted or provisional platform states map to `Denied` at the
/// service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Undetermined,
    Authorized,
    Denied,
}

/// Notification service failures.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The authorization request could not be delivered to the platform.
    #[error("authorization request failed: {0}")]
    Authorization(String),

    /// Submitting a reminder schedule failed.
    #[error("failed to schedule reminder for habit {habit_id}: {message}")]
    Schedule { habit_id: Uuid, message: String },

    /// Cancelling a pending reminder failed.
    #[error("failed to cancel reminder for habit {habit_id}: {message}")]
    Cancel { habit_id: Uuid, message: String },
}

/// Platform notification service.
///
/// `schedule` is keyed by habit id and must replace any pending
/// schedule for the same id, never add a second one. Status queries are
/// read-only and may be issued freely; `request_authorization` may
/// suspend until the user responds.
pub trait NotificationService: Send + Sync {
    /// Current platform authorization.
    fn authorization_status(&self) -> impl std::future::Future<Output = AuthorizationStatus> + Send;

    /// Ask the user for permission. Resolves to whether it was granted.
    fn request_authorization(&self) -> impl std::future::Future<Output = Result<bool, NotifyError>> + Send;

    /// Schedule (or replace) the daily reminder for `habit_id`.
    fn schedule(
        &self,
        habit_id: Uuid,
        time: NaiveTime,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;

    /// Remove any pending reminder for `habit_id`. Idempotent.
    fn cancel(&self, habit_id: Uuid) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}
