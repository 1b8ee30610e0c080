//! Reconciliation of habit reminder preferences with the platform.
//!
//! The reconciler is the sole caller of `schedule`/`cancel` and
//! maintains the invariant that each habit has at most one active
//! schedule. Calls for the same habit id serialize through a per-id
//! async lock so overlapping schedule/cancel submissions cannot race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::NaiveTime;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::habit::Habit;

use super::service::{AuthorizationStatus, NotificationService, NotifyError};

/// What a reconciliation pass did, surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A reminder is scheduled (replacing any prior one) at `time`.
    Scheduled { time: NaiveTime },
    /// Any pending reminder was cancelled; preference is off.
    Cancelled,
    /// Nothing needed to change.
    Unchanged,
    /// Permission was denied; the preference has been reverted to off.
    /// The caller should explain to the user how to grant permission.
    PermissionDenied,
    /// The schedule submission failed. The preference stays on because
    /// the user's intent is still valid, but the reminder is not
    /// guaranteed to fire; the caller should warn and may re-sync later.
    ScheduleFailed { reason: String },
}

/// Keeps reminder scheduling consistent with habit preference and
/// platform permission state.
pub struct Reconciler<S: NotificationService> {
    service: S,
    locks: StdMutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl<S: NotificationService> Reconciler<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// The injected platform service.
    pub fn service(&self) -> &S {
        &self.service
    }

    fn lock_for(&self, habit_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(habit_id).or_default().clone()
    }

    /// Bring the habit's scheduled reminder in line with its current
    /// preference and the platform's authorization state.
    ///
    /// `fallback_time` is used when the preference is on but no time
    /// has ever been configured (the on-without-time transient); it is
    /// stored on the habit before scheduling.
    ///
    /// On permission denial the preference is reverted to off and
    /// [`SyncOutcome::PermissionDenied`] is returned exactly once per
    /// call. Toggling off leaves `notification_time` untouched so a
    /// later re-enable reuses it.
    pub async fn sync(
        &self,
        habit: &mut Habit,
        fallback_time: NaiveTime,
    ) -> Result<SyncOutcome, NotifyError> {
        let lock = self.lock_for(habit.id());
        let _guard = lock.lock().await;

        if !habit.notifications_enabled {
            self.service.cancel(habit.id()).await?;
            debug!(habit_id = %habit.id(), "reminder cancelled");
            return Ok(SyncOutcome::Cancelled);
        }

        match self.service.authorization_status().await {
            AuthorizationStatus::Authorized => self.submit(habit, fallback_time).await,
            AuthorizationStatus::Denied => Ok(self.revert_preference(habit)),
            AuthorizationStatus::Undetermined => {
                let granted = match self.service.request_authorization().await {
                    Ok(granted) => granted,
                    Err(err) => {
                        // The platform treats a failed request like a
                        // denial; so do we.
                        warn!(habit_id = %habit.id(), error = %err, "authorization request failed");
                        false
                    }
                };
                // The request may have suspended for a long time.
                // Re-check current state instead of applying the
                // original intent blindly.
                if !habit.notifications_enabled {
                    self.service.cancel(habit.id()).await?;
                    return Ok(SyncOutcome::Cancelled);
                }
                if !granted {
                    return Ok(self.revert_preference(habit));
                }
                match self.service.authorization_status().await {
                    AuthorizationStatus::Authorized => self.submit(habit, fallback_time).await,
                    _ => Ok(self.revert_preference(habit)),
                }
            }
        }
    }

    /// Entry point for a user toggling the reminder preference. The
    /// habit already carries the new `notifications_enabled` value;
    /// reconciliation is the same as [`sync`](Self::sync).
    pub async fn on_preference_changed(
        &self,
        habit: &mut Habit,
        fallback_time: NaiveTime,
    ) -> Result<SyncOutcome, NotifyError> {
        self.sync(habit, fallback_time).await
    }

    /// Record a new reminder time and, if the reminder is currently on
    /// and authorized, replace the pending schedule with the new time.
    pub async fn on_time_changed(
        &self,
        habit: &mut Habit,
        time: NaiveTime,
    ) -> Result<SyncOutcome, NotifyError> {
        let lock = self.lock_for(habit.id());
        let _guard = lock.lock().await;

        habit.notification_time = Some(time);
        if !habit.notifications_enabled {
            return Ok(SyncOutcome::Unchanged);
        }
        match self.service.authorization_status().await {
            AuthorizationStatus::Authorized => self.submit(habit, time).await,
            _ => Ok(SyncOutcome::Unchanged),
        }
    }

    /// Cancel any pending reminder for a habit that is about to be
    /// removed. Must run before the habit leaves the owning collection.
    pub async fn on_deleted(&self, habit_id: Uuid) -> Result<(), NotifyError> {
        let lock = self.lock_for(habit_id);
        {
            let _guard = lock.lock().await;
            self.service.cancel(habit_id).await?;
            debug!(%habit_id, "reminder cancelled for deleted habit");
        }
        self.locks.lock().unwrap().remove(&habit_id);
        Ok(())
    }

    async fn submit(
        &self,
        habit: &mut Habit,
        fallback_time: NaiveTime,
    ) -> Result<SyncOutcome, NotifyError> {
        let time = *habit.notification_time.get_or_insert(fallback_time);
        match self.service.schedule(habit.id(), time, &habit.name).await {
            Ok(()) => {
                debug!(habit_id = %habit.id(), %time, "reminder scheduled");
                Ok(SyncOutcome::Scheduled { time })
            }
            Err(err) => {
                warn!(habit_id = %habit.id(), error = %err, "schedule submission failed");
                Ok(SyncOutcome::ScheduleFailed {
                    reason: err.to_string(),
                })
            }
        }
    }

    fn revert_preference(&self, habit: &mut Habit) -> SyncOutcome {
        habit.notifications_enabled = false;
        debug!(habit_id = %habit.id(), "permission denied, preference reverted");
        SyncOutcome::PermissionDenied
    }
}
