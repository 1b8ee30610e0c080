//! In-process notification service used by the CLI.
//!
//! Platform delivery is out of scope for the CLI binary; this service
//! is always authorized and records schedule/cancel decisions in the
//! log so reconciliation can still be exercised and inspected.

use chrono::NaiveTime;
use habits_core::{AuthorizationStatus, NotificationService, NotifyError};
use tracing::info;
use uuid::Uuid;

pub struct LocalNotificationService;

impl NotificationService for LocalNotificationService {
    async fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Authorized
    }

    async fn request_authorization(&self) -> Result<bool, NotifyError> {
        Ok(true)
    }

    async fn schedule(&self, habit_id: Uuid, time: NaiveTime, title: &str) -> Result<(), NotifyError> {
        info!(%habit_id, %time, title, "daily reminder scheduled");
        Ok(())
    }

    async fn cancel(&self, habit_id: Uuid) -> Result<(), NotifyError> {
        info!(%habit_id, "reminder cancelled");
        Ok(())
    }
}
