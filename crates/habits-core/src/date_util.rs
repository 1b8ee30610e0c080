//! Calendar-day normalization and period helpers.
//!
//! All ledger operations work at day granularity in the local calendar:
//! any timestamp is collapsed to its calendar day before it touches a
//! habit's entry set, so two timestamps on the same day are equivalent.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar period for entry counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The calendar month containing "today" at call time.
    Month,
    /// The calendar year containing "today" at call time.
    Year,
    /// No lower bound.
    AllTime,
}

/// Normalize a timestamp to its calendar day in the local calendar.
pub fn day_of(ts: DateTime<Local>) -> NaiveDate {
    ts.date_naive()
}

/// Today's calendar day in the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The last `count` calendar days ending at `anchor`, newest first.
///
/// `anchor` itself is included, so `past_days_from(d, 1) == vec![d]`.
pub fn past_days_from(anchor: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|offset| anchor - Duration::days(offset as i64))
        .collect()
}

/// The last `count` calendar days ending today, newest first.
pub fn past_days(count: usize) -> Vec<NaiveDate> {
    past_days_from(today(), count)
}

/// Whether `day` falls within `period`, with "current" evaluated
/// against `anchor`.
pub fn in_period(day: NaiveDate, period: Period, anchor: NaiveDate) -> bool {
    match period {
        Period::Month => day.year() == anchor.year() && day.month() == anchor.month(),
        Period::Year => day.year() == anchor.year(),
        Period::AllTime => true,
    }
}
