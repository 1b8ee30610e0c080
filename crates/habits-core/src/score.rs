//! Activity score over a trailing window of calendar days.
//!
//! The score is the percentage of days in the window on which the habit
//! was completed, recomputed from the ledger on every call. Nothing is
//! cached, so it always reflects the latest entries.

use chrono::NaiveDate;
use thiserror::Error;

use crate::date_util::{self, past_days_from};
use crate::habit::Habit;

/// Default trailing window length, matching the recent-days row shown
/// in the habit list.
pub const DEFAULT_WINDOW_DAYS: usize = 5;

/// Invalid input to a score computation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// The window must cover at least one day.
    #[error("score window must cover at least one day")]
    EmptyWindow,
}

/// Score for the window ending today (inclusive), in `[0.0, 100.0]`.
pub fn score(habit: &Habit, window_days: usize) -> Result<f64, ScoreError> {
    score_at(habit, window_days, date_util::today())
}

/// Score for the window of `window_days` calendar days ending at
/// `anchor` (inclusive).
pub fn score_at(habit: &Habit, window_days: usize, anchor: NaiveDate) -> Result<f64, ScoreError> {
    if window_days == 0 {
        return Err(ScoreError::EmptyWindow);
    }
    let completed = past_days_from(anchor, window_days)
        .into_iter()
        .filter(|day| habit.check_day(*day))
        .count();
    Ok(100.0 * completed as f64 / window_days as f64)
}

/// The last `count` days ending today with per-day completion, for the
/// recent-activity row. Newest first unless `reversed`.
pub fn recent_days(habit: &Habit, count: usize, reversed: bool) -> Vec<(NaiveDate, bool)> {
    let mut days: Vec<(NaiveDate, bool)> = date_util::past_days(count)
        .into_iter()
        .map(|day| (day, habit.check_day(day)))
        .collect();
    if reversed {
        days.reverse();
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Color;
    use chrono::Duration;
    use proptest::prelude::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn zero_window_is_an_error() {
        let habit = Habit::new("Test", Color::default());
        assert_eq!(score_at(&habit, 0, anchor()), Err(ScoreError::EmptyWindow));
    }

    #[test]
    fn empty_ledger_scores_zero() {
        let habit = Habit::new("Test", Color::default());
        assert_eq!(score_at(&habit, 5, anchor()).unwrap(), 0.0);
    }

    #[test]
    fn full_window_scores_hundred() {
        let mut habit = Habit::new("Test", Color::default());
        for day in date_util::past_days_from(anchor(), 5) {
            habit.add_day(day);
        }
        assert_eq!(score_at(&habit, 5, anchor()).unwrap(), 100.0);
    }

    #[test]
    fn three_of_five_days_scores_sixty() {
        let mut habit = Habit::new("Test", Color::default());
        habit.add_day(anchor());
        habit.add_day(anchor() - Duration::days(1));
        habit.add_day(anchor() - Duration::days(3));
        assert_eq!(score_at(&habit, 5, anchor()).unwrap(), 60.0);
    }

    #[test]
    fn entries_outside_the_window_do_not_count() {
        let mut habit = Habit::new("Test", Color::default());
        habit.add_day(anchor() - Duration::days(5)); // one past the window
        assert_eq!(score_at(&habit, 5, anchor()).unwrap(), 0.0);
    }

    #[test]
    fn recent_days_order_honors_reversed_flag() {
        let habit = Habit::new("Test", Color::default());
        let forward = recent_days(&habit, 3, false);
        let reversed = recent_days(&habit, 3, true);
        assert_eq!(forward.len(), 3);
        assert!(forward[0].0 > forward[1].0);
        assert_eq!(forward[0].0, reversed[2].0);
    }

    proptest! {
        #[test]
        fn score_is_bounded(offsets in proptest::collection::btree_set(0i64..30, 0..30), window in 1usize..30) {
            let mut habit = Habit::new("p", Color::default());
            for offset in &offsets {
                habit.add_day(anchor() - Duration::days(*offset));
            }
            let s = score_at(&habit, window, anchor()).unwrap();
            prop_assert!((0.0..=100.0).contains(&s));
        }

        #[test]
        fn score_is_monotonic_in_completed_days(offsets in proptest::collection::btree_set(0i64..10, 0..10), extra in 0i64..10) {
            let mut habit = Habit::new("p", Color::default());
            for offset in &offsets {
                habit.add_day(anchor() - Duration::days(*offset));
            }
            let before = score_at(&habit, 10, anchor()).unwrap();
            habit.add_day(anchor() - Duration::days(extra));
            let after = score_at(&habit, 10, anchor()).unwrap();
            prop_assert!(after >= before);
        }
    }
}
