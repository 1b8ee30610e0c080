//! Score and count queries.

use clap::Subcommand;
use habits_core::{score, Config, HabitStore, Period};
use serde::Serialize;

use super::resolve_id;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Score and period counts for one habit
    Show {
        /// Habit name
        name: String,
        /// Override the configured score window length
        #[arg(long)]
        window: Option<usize>,
    },
    /// Per-day completion over the recent window
    Recent {
        /// Habit name
        name: String,
        /// Number of days to show
        #[arg(long)]
        days: Option<usize>,
    },
}

#[derive(Serialize)]
struct HabitStats {
    name: String,
    score: f64,
    window_days: usize,
    month: usize,
    year: usize,
    total: usize,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = HabitStore::open()?;
    let config = Config::load()?;

    match action {
        StatsAction::Show { name, window } => {
            let id = resolve_id(&store, &name)?;
            let habit = store.get(id).expect("resolved id is present");
            let window_days = window.unwrap_or(config.score.window_days);
            let stats = HabitStats {
                name: habit.name.clone(),
                score: score::score(habit, window_days)?,
                window_days,
                month: habit.entry_count(Period::Month),
                year: habit.entry_count(Period::Year),
                total: habit.entry_count(Period::AllTime),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent { name, days } => {
            let id = resolve_id(&store, &name)?;
            let habit = store.get(id).expect("resolved id is present");
            let count = days.unwrap_or(config.display.recent_days);
            let rows = score::recent_days(habit, count, config.display.dates_appear_reversed);
            for (day, done) in rows {
                println!("{day}  {}", if done { "completed" } else { "-" });
            }
        }
    }
    Ok(())
}
