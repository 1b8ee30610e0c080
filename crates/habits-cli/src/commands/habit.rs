//! Habit management commands.

use clap::Subcommand;
use habits_core::{score, Color, Config, Habit, HabitStore, Reconciler};

use crate::service::LocalNotificationService;

use super::{resolve_id, runtime};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Color as "r,g,b" components in 0..=1, or blue/green/orange
        #[arg(long)]
        color: Option<String>,
    },
    /// List habits with score and recent days
    List {
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Rename a habit (identity is unchanged)
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Change a habit's color
    Color {
        /// Habit name
        name: String,
        /// Color as "r,g,b" components in 0..=1, or blue/green/orange
        color: String,
    },
    /// Delete a habit, cancelling any pending reminder first
    Delete {
        /// Habit name
        name: String,
    },
    /// Populate the store with sample habits
    Sample,
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = HabitStore::open()?;

    match action {
        HabitAction::Add { name, color } => {
            if name.trim().is_empty() {
                return Err("habit name must not be blank".into());
            }
            let color = match color {
                Some(raw) => parse_color(&raw)?,
                None => Color::default(),
            };
            store.add(Habit::new(name.trim(), color));
            store.save()?;
            println!("ok");
        }
        HabitAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.habits())?);
            } else {
                for habit in store.habits() {
                    let s = score::score(habit, config.score.window_days)?;
                    let row: String = score::recent_days(
                        habit,
                        config.display.recent_days,
                        config.display.dates_appear_reversed,
                    )
                    .iter()
                    .map(|(_, done)| if *done { 'x' } else { '.' })
                    .collect();
                    println!("{:<24} {:>5.1}%  {}", habit.name, s, row);
                }
            }
        }
        HabitAction::Rename { name, new_name } => {
            if new_name.trim().is_empty() {
                return Err("habit name must not be blank".into());
            }
            let id = resolve_id(&store, &name)?;
            if let Some(habit) = store.get_mut(id) {
                habit.name = new_name.trim().to_string();
            }
            store.save()?;
            println!("ok");
        }
        HabitAction::Color { name, color } => {
            let parsed = parse_color(&color)?;
            let id = resolve_id(&store, &name)?;
            if let Some(habit) = store.get_mut(id) {
                habit.color = parsed;
            }
            store.save()?;
            println!("ok");
        }
        HabitAction::Delete { name } => {
            let id = resolve_id(&store, &name)?;
            // Cancel the reminder before the habit leaves the store.
            let reconciler = Reconciler::new(LocalNotificationService);
            runtime()?.block_on(reconciler.on_deleted(id))?;
            store.remove(id);
            store.save()?;
            println!("ok");
        }
        HabitAction::Sample => {
            for habit in Habit::sample_data() {
                store.add(habit);
            }
            store.save()?;
            println!("ok");
        }
    }
    Ok(())
}

fn parse_color(raw: &str) -> Result<Color, Box<dyn std::error::Error>> {
    match raw {
        "blue" => return Ok(Color::BLUE),
        "green" => return Ok(Color::GREEN),
        "orange" => return Ok(Color::ORANGE),
        _ => {}
    }
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("invalid color '{raw}', expected \"r,g,b\" or a named color").into());
    }
    let mut components = [0.0f64; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid color component '{part}'"))?;
    }
    Ok(Color::new(components[0], components[1], components[2]))
}
