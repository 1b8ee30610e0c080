//! Completion entry commands. All operate at day granularity and
//! default to today.

use clap::Subcommand;
use habits_core::HabitStore;

use super::{parse_date, resolve_id};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Mark a day complete
    Add {
        /// Habit name
        name: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Unmark a day
    Remove {
        /// Habit name
        name: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Flip a day's completion
    Toggle {
        /// Habit name
        name: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show whether a day is complete
    Check {
        /// Habit name
        name: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: EntryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = HabitStore::open()?;

    match action {
        EntryAction::Add { name, date } => {
            let day = parse_date(date.as_deref())?;
            let id = resolve_id(&store, &name)?;
            if let Some(habit) = store.get_mut(id) {
                habit.add_day(day);
            }
            store.save()?;
            println!("ok");
        }
        EntryAction::Remove { name, date } => {
            let day = parse_date(date.as_deref())?;
            let id = resolve_id(&store, &name)?;
            if let Some(habit) = store.get_mut(id) {
                habit.delete_day(day);
            }
            store.save()?;
            println!("ok");
        }
        EntryAction::Toggle { name, date } => {
            let day = parse_date(date.as_deref())?;
            let id = resolve_id(&store, &name)?;
            let now_done = store
                .get_mut(id)
                .map(|habit| habit.toggle_day(day))
                .unwrap_or(false);
            store.save()?;
            println!("{}", if now_done { "completed" } else { "not completed" });
        }
        EntryAction::Check { name, date } => {
            let day = parse_date(date.as_deref())?;
            let id = resolve_id(&store, &name)?;
            let done = store.get(id).map(|habit| habit.check_day(day)).unwrap_or(false);
            println!("{}", if done { "completed" } else { "not completed" });
        }
    }
    Ok(())
}
