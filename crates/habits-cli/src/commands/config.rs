//! Configuration commands.

use clap::Subcommand;
use habits_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "score.window_days")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match get(&config, &key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            set(&mut config, &key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn get(config: &Config, key: &str) -> Option<String> {
    match key {
        "score.window_days" => Some(config.score.window_days.to_string()),
        "display.dates_appear_reversed" => Some(config.display.dates_appear_reversed.to_string()),
        "display.recent_days" => Some(config.display.recent_days.to_string()),
        _ => None,
    }
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "score.window_days" => {
            let parsed: usize = value.parse()?;
            if parsed == 0 {
                return Err("score.window_days must be at least 1".into());
            }
            config.score.window_days = parsed;
        }
        "display.dates_appear_reversed" => {
            config.display.dates_appear_reversed = value.parse()?;
        }
        "display.recent_days" => {
            let parsed: usize = value.parse()?;
            if parsed == 0 {
                return Err("display.recent_days must be at least 1".into());
            }
            config.display.recent_days = parsed;
        }
        _ => return Err(format!("unknown key: {key}").into()),
    }
    Ok(())
}
