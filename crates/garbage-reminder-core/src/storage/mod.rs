mod config;

pub use config::{Config, HabitConfig, NotificationsConfig, ReminderConfig, UiConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable naming the shared data directory outright.
pub const HOME_ENV: &str = "GARBAGE_REMINDER_HOME";

/// Returns the shared data directory every surface reads settings from.
///
/// `GARBAGE_REMINDER_HOME` wins when set. Otherwise the directory is
/// `~/.config/garbage-reminder[-dev]/` based on GARBAGE_REMINDER_ENV
/// (set GARBAGE_REMINDER_ENV=dev for the development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GARBAGE_REMINDER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("garbage-reminder-dev")
            } else {
                base_dir.join("garbage-reminder")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
