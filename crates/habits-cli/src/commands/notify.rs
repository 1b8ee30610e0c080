//! Reminder notification commands.
//!
//! Every preference change routes through the reconciler so the
//! scheduled state always matches what the store says.

use chrono::NaiveTime;
use clap::Subcommand;
use habits_core::{HabitStore, NotificationService, Reconciler, SyncOutcome};

use crate::service::LocalNotificationService;

use super::{resolve_id, runtime};

/// Used when a reminder is enabled before any time was ever configured.
const DEFAULT_REMINDER_TIME: (u32, u32) = (9, 0);

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Turn the daily reminder on
    Enable {
        /// Habit name
        name: String,
        /// Reminder time (HH:MM); defaults to the previously chosen
        /// time, or 09:00 if none was ever set
        #[arg(long)]
        time: Option<String>,
    },
    /// Turn the daily reminder off (the chosen time is kept)
    Disable {
        /// Habit name
        name: String,
    },
    /// Change the reminder time
    Time {
        /// Habit name
        name: String,
        /// New time (HH:MM)
        time: String,
    },
    /// Show the platform authorization status
    Status,
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    let reconciler = Reconciler::new(LocalNotificationService);
    let rt = runtime()?;

    match action {
        NotifyAction::Enable { name, time } => {
            let mut store = HabitStore::open()?;
            let id = resolve_id(&store, &name)?;
            let explicit = time.as_deref().map(parse_time).transpose()?;
            let fallback = explicit.unwrap_or_else(|| {
                NaiveTime::from_hms_opt(DEFAULT_REMINDER_TIME.0, DEFAULT_REMINDER_TIME.1, 0)
                    .expect("valid default time")
            });
            let habit = store.get_mut(id).expect("resolved id is present");
            habit.notifications_enabled = true;
            if explicit.is_some() {
                habit.notification_time = explicit;
            }
            let outcome = rt.block_on(reconciler.on_preference_changed(habit, fallback))?;
            store.save()?;
            report(&outcome);
        }
        NotifyAction::Disable { name } => {
            let mut store = HabitStore::open()?;
            let id = resolve_id(&store, &name)?;
            let habit = store.get_mut(id).expect("resolved id is present");
            habit.notifications_enabled = false;
            let fallback = habit.notification_time.unwrap_or(
                NaiveTime::from_hms_opt(DEFAULT_REMINDER_TIME.0, DEFAULT_REMINDER_TIME.1, 0)
                    .expect("valid default time"),
            );
            let outcome = rt.block_on(reconciler.on_preference_changed(habit, fallback))?;
            store.save()?;
            report(&outcome);
        }
        NotifyAction::Time { name, time } => {
            let mut store = HabitStore::open()?;
            let id = resolve_id(&store, &name)?;
            let new_time = parse_time(&time)?;
            let habit = store.get_mut(id).expect("resolved id is present");
            let outcome = rt.block_on(reconciler.on_time_changed(habit, new_time))?;
            store.save()?;
            report(&outcome);
        }
        NotifyAction::Status => {
            let status = rt.block_on(reconciler.service().authorization_status());
            println!("{}", serde_json::to_string(&status)?);
        }
    }
    Ok(())
}

fn report(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Scheduled { time } => println!("reminder scheduled at {time}"),
        SyncOutcome::Cancelled => println!("reminder off"),
        SyncOutcome::Unchanged => println!("ok"),
        SyncOutcome::PermissionDenied => {
            println!("notifications are not permitted; reminder stays off");
            println!("grant permission in system settings and try again");
        }
        SyncOutcome::ScheduleFailed { reason } => {
            println!("reminder kept on, but scheduling failed: {reason}");
        }
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    Ok(NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))?)
}
