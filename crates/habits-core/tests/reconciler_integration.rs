//! Reconciler integration tests.
//!
//! Drives the reconciler against a recording mock service and verifies
//! the preference/permission state machine end to end.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use uuid::Uuid;

use habits_core::{
    AuthorizationStatus, Color, Habit, NotificationService, NotifyError, Reconciler, SyncOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Schedule(Uuid, NaiveTime, String),
    Cancel(Uuid),
}

/// Recording mock of the platform notification service.
///
/// `schedule` replaces by id like the real platform; granting an
/// authorization request flips the stored status to `Authorized`,
/// denying flips it to `Denied`.
struct MockService {
    status: Mutex<AuthorizationStatus>,
    grant: bool,
    fail_schedule: AtomicBool,
    request_count: AtomicUsize,
    calls: Mutex<Vec<Call>>,
    pending: Mutex<Vec<Uuid>>,
    gate: Option<tokio::sync::Semaphore>,
    started: tokio::sync::Notify,
}

impl MockService {
    fn with_status(status: AuthorizationStatus) -> Self {
        Self {
            status: Mutex::new(status),
            grant: true,
            fail_schedule: AtomicBool::new(false),
            request_count: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            gate: None,
            started: tokio::sync::Notify::new(),
        }
    }

    fn denying() -> Self {
        Self {
            grant: false,
            ..Self::with_status(AuthorizationStatus::Undetermined)
        }
    }

    /// Gate `schedule` on a semaphore permit so a test can hold the
    /// call open and observe per-id serialization.
    fn gated(status: AuthorizationStatus) -> Self {
        Self {
            gate: Some(tokio::sync::Semaphore::new(0)),
            ..Self::with_status(status)
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn pending(&self) -> Vec<Uuid> {
        self.pending.lock().unwrap().clone()
    }

    fn requests(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl NotificationService for MockService {
    async fn authorization_status(&self) -> AuthorizationStatus {
        *self.status.lock().unwrap()
    }

    async fn request_authorization(&self) -> Result<bool, NotifyError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        *self.status.lock().unwrap() = if self.grant {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };
        Ok(self.grant)
    }

    async fn schedule(&self, habit_id: Uuid, time: NaiveTime, title: &str) -> Result<(), NotifyError> {
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.unwrap();
        }
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(NotifyError::Schedule {
                habit_id,
                message: "submission rejected".to_string(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Schedule(habit_id, time, title.to_string()));
        let mut pending = self.pending.lock().unwrap();
        pending.retain(|id| *id != habit_id);
        pending.push(habit_id);
        Ok(())
    }

    async fn cancel(&self, habit_id: Uuid) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(Call::Cancel(habit_id));
        self.pending.lock().unwrap().retain(|id| *id != habit_id);
        Ok(())
    }
}

fn nine_am() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

fn enabled_habit() -> Habit {
    let mut habit = Habit::new("Read", Color::default());
    habit.notifications_enabled = true;
    habit
}

#[tokio::test]
async fn authorized_toggle_on_stores_time_and_schedules() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = enabled_habit();

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Scheduled { time: nine_am() });
    assert_eq!(habit.notification_time, Some(nine_am()));
    assert_eq!(
        reconciler.service().calls(),
        vec![Call::Schedule(habit.id(), nine_am(), "Read".to_string())]
    );
}

#[tokio::test]
async fn undetermined_denied_reverts_preference_with_one_signal() {
    let reconciler = Reconciler::new(MockService::denying());
    let mut habit = enabled_habit();

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::PermissionDenied);
    assert!(!habit.notifications_enabled);
    assert_eq!(reconciler.service().requests(), 1);
    assert!(reconciler.service().calls().is_empty());
}

#[tokio::test]
async fn undetermined_granted_schedules() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Undetermined));
    let mut habit = enabled_habit();

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Scheduled { time: nine_am() });
    assert!(habit.notifications_enabled);
    assert_eq!(reconciler.service().requests(), 1);
    assert_eq!(reconciler.service().pending(), vec![habit.id()]);
}

#[tokio::test]
async fn already_denied_reverts_without_requesting() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Denied));
    let mut habit = enabled_habit();

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::PermissionDenied);
    assert!(!habit.notifications_enabled);
    assert_eq!(reconciler.service().requests(), 0);
}

#[tokio::test]
async fn toggle_on_then_off_schedules_once_and_cancels_once() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = enabled_habit();

    reconciler
        .on_preference_changed(&mut habit, nine_am())
        .await
        .unwrap();
    habit.notifications_enabled = false;
    let outcome = reconciler
        .on_preference_changed(&mut habit, nine_am())
        .await
        .unwrap();

    assert_eq!(outcome, SyncOutcome::Cancelled);
    assert_eq!(
        reconciler.service().calls(),
        vec![
            Call::Schedule(habit.id(), nine_am(), "Read".to_string()),
            Call::Cancel(habit.id()),
        ]
    );
    assert!(reconciler.service().pending().is_empty());
    // Toggle-off keeps the chosen time for a later re-enable.
    assert_eq!(habit.notification_time, Some(nine_am()));
}

#[tokio::test]
async fn time_change_while_on_replaces_the_schedule() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = enabled_habit();
    reconciler.sync(&mut habit, nine_am()).await.unwrap();

    let new_time = NaiveTime::from_hms_opt(20, 30, 0).unwrap();
    let outcome = reconciler.on_time_changed(&mut habit, new_time).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Scheduled { time: new_time });
    assert_eq!(habit.notification_time, Some(new_time));
    // Replacement by id, never a second pending entry.
    assert_eq!(reconciler.service().pending(), vec![habit.id()]);
}

#[tokio::test]
async fn time_change_while_off_only_records_the_time() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = Habit::new("Read", Color::default());

    let outcome = reconciler.on_time_changed(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(habit.notification_time, Some(nine_am()));
    assert!(reconciler.service().calls().is_empty());
}

#[tokio::test]
async fn delete_cancels_before_removal() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = enabled_habit();
    reconciler.sync(&mut habit, nine_am()).await.unwrap();
    assert_eq!(reconciler.service().pending(), vec![habit.id()]);

    reconciler.on_deleted(habit.id()).await.unwrap();

    assert!(reconciler.service().pending().is_empty());
    assert_eq!(
        reconciler.service().calls().last(),
        Some(&Call::Cancel(habit.id()))
    );
}

#[tokio::test]
async fn schedule_failure_keeps_preference_on() {
    let service = MockService::with_status(AuthorizationStatus::Authorized);
    service.fail_schedule.store(true, Ordering::SeqCst);
    let reconciler = Reconciler::new(service);
    let mut habit = enabled_habit();

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    match outcome {
        SyncOutcome::ScheduleFailed { reason } => {
            assert!(reason.contains("submission rejected"));
        }
        other => panic!("expected ScheduleFailed, got {other:?}"),
    }
    // Intent is still valid; only delivery is not guaranteed.
    assert!(habit.notifications_enabled);
    assert!(reconciler.service().pending().is_empty());
}

#[tokio::test]
async fn existing_time_is_not_overwritten_by_fallback() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Authorized));
    let mut habit = enabled_habit();
    let chosen = NaiveTime::from_hms_opt(6, 45, 0).unwrap();
    habit.notification_time = Some(chosen);

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Scheduled { time: chosen });
    assert_eq!(habit.notification_time, Some(chosen));
}

#[tokio::test]
async fn sync_on_disabled_habit_cancels_unconditionally() {
    let reconciler = Reconciler::new(MockService::with_status(AuthorizationStatus::Denied));
    let mut habit = Habit::new("Read", Color::default());

    let outcome = reconciler.sync(&mut habit, nine_am()).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Cancelled);
    assert_eq!(reconciler.service().calls(), vec![Call::Cancel(habit.id())]);
}

#[tokio::test]
async fn delete_waits_for_in_flight_schedule_on_same_id() {
    let reconciler = Arc::new(Reconciler::new(MockService::gated(
        AuthorizationStatus::Authorized,
    )));
    let mut habit = enabled_habit();
    let id = habit.id();

    let sync_task = {
        let reconciler = Arc::clone(&reconciler);
        tokio::spawn(async move { reconciler.sync(&mut habit, nine_am()).await })
    };

    // Wait until the schedule call is in flight and holding the id lock.
    reconciler.service().started.notified().await;

    let delete_task = {
        let reconciler = Arc::clone(&reconciler);
        tokio::spawn(async move { reconciler.on_deleted(id).await })
    };

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    // The cancel must not have run while the schedule is still pending.
    assert!(reconciler.service().calls().is_empty());

    reconciler.service().gate.as_ref().unwrap().add_permits(1);
    sync_task.await.unwrap().unwrap();
    delete_task.await.unwrap().unwrap();

    assert_eq!(
        reconciler.service().calls(),
        vec![
            Call::Schedule(id, nine_am(), "Read".to_string()),
            Call::Cancel(id),
        ]
    );
    assert!(reconciler.service().pending().is_empty());
}
