//! Reminder notifications: platform service seam and the reconciler
//! that keeps scheduled reminders consistent with habit preferences.

mod reconciler;
mod service;

pub use reconciler::{Reconciler, SyncOutcome};
pub use service::{AuthorizationStatus, NotificationService, NotifyError};
