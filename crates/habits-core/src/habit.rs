//! Habit entity and its entry ledger.
//!
//! A habit owns a set of calendar days on which it was completed. A day
//! is either present or absent, never fractional, and all ledger
//! operations normalize timestamps to calendar days first, so they are
//! total and idempotent over any input.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_util::{self, Period};

/// Device-independent RGB color, components in `0.0..=1.0`.
///
/// Persisted with the habit so the display color survives restarts
/// without depending on any UI color type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const BLUE: Color = Color { red: 0.0, green: 0.48, blue: 1.0 };
    pub const GREEN: Color = Color { red: 0.2, green: 0.78, blue: 0.35 };
    pub const ORANGE: Color = Color { red: 1.0, green: 0.58, blue: 0.0 };

    /// Create a color, clamping each component into `0.0..=1.0`.
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: red.clamp(0.0, 1.0),
            green: green.clamp(0.0, 1.0),
            blue: blue.clamp(0.0, 1.0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

/// A tracked habit: identity, display attributes, completion ledger,
/// and reminder preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    entries: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub notifications_enabled: bool,
    /// Reminder time of day. Kept when notifications are toggled off so
    /// re-enabling does not require picking the time again.
    #[serde(default)]
    pub notification_time: Option<NaiveTime>,
}

impl Habit {
    /// Create an empty habit: no entries, notifications disabled.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
            entries: BTreeSet::new(),
            notifications_enabled: false,
            notification_time: None,
        }
    }

    /// Stable identity. Never changes across edits.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mark the calendar day containing `ts` complete. No-op if the day
    /// is already present.
    pub fn add_entry(&mut self, ts: DateTime<Local>) {
        self.add_day(date_util::day_of(ts));
    }

    /// Unmark the calendar day containing `ts`. No-op if absent.
    pub fn delete_entry(&mut self, ts: DateTime<Local>) {
        self.delete_day(date_util::day_of(ts));
    }

    /// Whether the calendar day containing `ts` is marked complete.
    pub fn check_entry(&self, ts: DateTime<Local>) -> bool {
        self.check_day(date_util::day_of(ts))
    }

    /// Day-level insert. No-op if already present.
    pub fn add_day(&mut self, day: NaiveDate) {
        self.entries.insert(day);
    }

    /// Day-level remove. No-op if absent.
    pub fn delete_day(&mut self, day: NaiveDate) {
        self.entries.remove(&day);
    }

    /// Day-level membership check.
    pub fn check_day(&self, day: NaiveDate) -> bool {
        self.entries.contains(&day)
    }

    /// Flip completion for `day`, returning the new state.
    pub fn toggle_day(&mut self, day: NaiveDate) -> bool {
        if self.check_day(day) {
            self.delete_day(day);
            false
        } else {
            self.add_day(day);
            true
        }
    }

    /// Count entries falling within `period`, with "current" evaluated
    /// at call time.
    pub fn entry_count(&self, period: Period) -> usize {
        self.entry_count_at(period, date_util::today())
    }

    /// Count entries falling within `period` relative to `anchor`.
    pub fn entry_count_at(&self, period: Period, anchor: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|day| date_util::in_period(**day, period, anchor))
            .count()
    }

    /// All completed days, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().copied()
    }

    /// Sample habits for demos and tests.
    pub fn sample_data() -> Vec<Habit> {
        let today = date_util::today();
        let mut reading = Habit::new("Read 10 pages", Color::BLUE);
        for day in date_util::past_days_from(today, 3) {
            reading.add_day(day);
        }
        let mut running = Habit::new("Morning run", Color::GREEN);
        running.add_day(today);
        running.add_day(today - chrono::Duration::days(2));
        let stretching = Habit::new("Stretch", Color::ORANGE);
        vec![reading, running, stretching]
    }
}
