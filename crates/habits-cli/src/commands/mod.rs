pub mod config;
pub mod entry;
pub mod habit;
pub mod notify;
pub mod stats;

use chrono::NaiveDate;
use habits_core::HabitStore;
use uuid::Uuid;

/// Resolve a habit by name, exiting with a clear message if absent.
pub fn resolve_id(store: &HabitStore, name: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    match store.find_by_name(name) {
        Some(habit) => Ok(habit.id()),
        None => Err(format!("no habit named '{name}'").into()),
    }
}

/// Parse `--date` arguments, defaulting to today.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(raw) => Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))?),
        None => Ok(habits_core::date_util::today()),
    }
}

/// Single-threaded runtime for the async notification paths.
pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
