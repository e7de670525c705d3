//! TOML-based settings shared by every surface.
//!
//! Stores user preferences including:
//! - Reminder time and weekday
//! - Language, widget theme and opacity, week numbering
//! - Notification sound
//! - The habit log of every reminder time ever saved
//!
//! Settings are stored at `<data dir>/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data_dir;
use crate::bin_week::{bin_for_date, BinLabel, WeekNumbering};
use crate::error::{ConfigError, ValidationError};
use crate::habit::{HabitLog, Suggestion};
use crate::i18n::Language;
use crate::notification::Sound;
use crate::widget::WidgetTheme;

/// Weekly reminder rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderConfig {
    /// Last saved reminder instant, epoch seconds. Only its wall-clock
    /// hour and minute matter for scheduling.
    #[serde(default = "default_reminder_time")]
    pub time: i64,
    /// 1 = Sunday .. 7 = Saturday.
    #[serde(default = "default_reminder_day")]
    pub day: u8,
}

/// Appearance and locale configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: WidgetTheme,
    #[serde(default = "default_widget_opacity")]
    pub widget_opacity: f64,
    #[serde(default)]
    pub week_numbering: WeekNumbering,
}

/// Notification configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub sound: Sound,
}

/// Reminder habit history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HabitConfig {
    /// Comma-joined epoch seconds, oldest first. Grows on every save.
    #[serde(default)]
    pub selected_times: String,
}

/// Application settings.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub habit: HabitConfig,
}

// Default functions
fn default_reminder_time() -> i64 {
    chrono::Utc::now().timestamp()
}
fn default_reminder_day() -> u8 {
    1
}
fn default_widget_opacity() -> f64 {
    0.8
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            time: default_reminder_time(),
            day: default_reminder_day(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            theme: WidgetTheme::default(),
            widget_opacity: default_widget_opacity(),
            week_numbering: WeekNumbering::default(),
        }
    }
}

fn validate_day(day: u8) -> Result<(), ValidationError> {
    if (1..=7).contains(&day) {
        Ok(())
    } else {
        Err(ValidationError::DayOutOfRange(i64::from(day)))
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Canonical spelling for enum-valued keys, so `dark` and `Dark` both
    /// work on the command line.
    fn normalize_value(key: &str, value: &str) -> Result<String, ValidationError> {
        let normalized = match key {
            "ui.language" => value.parse::<Language>()?.code().to_string(),
            "ui.theme" => value.parse::<WidgetTheme>()?.name().to_string(),
            "ui.week_numbering" => value.parse::<WeekNumbering>()?.as_str().to_string(),
            "notifications.sound" => value.parse::<Sound>()?.name().to_string(),
            _ => value.to_string(),
        };
        Ok(normalized)
    }

    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_day(self.reminder.day)?;
        let opacity = self.ui.widget_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ValidationError::InvalidValue {
                field: "ui.widget_opacity".into(),
                message: format!("must be between 0.0 and 1.0, got {opacity}"),
            });
        }
        Ok(())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the shared data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate().map_err(|e| load_failed(e.to_string()))?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                info!(path = %path.display(), "wrote default settings");
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the shared data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse or
    /// validate. On error `self` is left unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let value = Self::normalize_value(key, value).map_err(|e| invalid(e.to_string()))?;

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, &value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate().map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Parsed habit log.
    pub fn habit_log(&self) -> HabitLog {
        HabitLog::parse(&self.habit.selected_times)
    }

    /// Record a confirmed reminder: overwrite time and day, and append the
    /// time to the habit log. Does not save.
    pub fn save_reminder(&mut self, time: i64, day: u8) -> Result<(), ValidationError> {
        validate_day(day)?;
        self.reminder.time = time;
        self.reminder.day = day;
        let mut log = self.habit_log();
        log.push(time);
        self.habit.selected_times = log.to_string();
        Ok(())
    }

    /// Smart reminder suggestion from the habit log, falling back to the
    /// current reminder time.
    pub fn suggestion(&self) -> Option<Suggestion> {
        self.habit_log().suggestion(self.reminder.time)
    }

    /// Make the suggested time the reminder time. The habit log is left
    /// alone since nothing new was chosen. Returns the applied suggestion.
    pub fn accept_suggestion(&mut self) -> Option<Suggestion> {
        let suggestion = self.suggestion()?;
        self.reminder.time = suggestion.reminder_time;
        Some(suggestion)
    }

    /// Bin label for `date` under the configured week numbering.
    pub fn bin_label_for(&self, date: NaiveDate) -> BinLabel {
        bin_for_date(date, self.ui.week_numbering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.reminder.day, 1);
        assert_eq!(cfg.ui.language, Language::En);
        assert_eq!(cfg.ui.theme, WidgetTheme::Light);
        assert_eq!(cfg.ui.widget_opacity, 0.8);
        assert_eq!(cfg.ui.week_numbering, WeekNumbering::Iso);
        assert_eq!(cfg.notifications.sound, Sound::Default);
        assert!(cfg.habit.selected_times.is_empty());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[ui]\ntheme = \"Dark\"\n").unwrap();
        assert_eq!(parsed.ui.theme, WidgetTheme::Dark);
        assert_eq!(parsed.ui.widget_opacity, 0.8);
        assert_eq!(parsed.reminder.day, 1);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let mut cfg = Config::default();
        cfg.reminder.time = 1_723_700_000;
        assert_eq!(cfg.get("reminder.time").as_deref(), Some("1723700000"));
        assert_eq!(cfg.get("ui.theme").as_deref(), Some("Light"));
        assert_eq!(cfg.get("ui.language").as_deref(), Some("en"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("ui").is_none());
    }

    #[test]
    fn set_value_normalizes_enum_names() {
        let mut cfg = Config::default();
        cfg.set_value("ui.theme", "dark").unwrap();
        cfg.set_value("ui.language", "ZH").unwrap();
        cfg.set_value("notifications.sound", "chime").unwrap();
        cfg.set_value("ui.week_numbering", "Gregorian").unwrap();
        assert_eq!(cfg.ui.theme, WidgetTheme::Dark);
        assert_eq!(cfg.ui.language, Language::Zh);
        assert_eq!(cfg.notifications.sound, Sound::Chime);
        assert_eq!(cfg.ui.week_numbering, WeekNumbering::Gregorian);
    }

    #[test]
    fn set_value_updates_numbers() {
        let mut cfg = Config::default();
        cfg.set_value("reminder.day", "5").unwrap();
        cfg.set_value("ui.widget_opacity", "0.5").unwrap();
        cfg.set_value("reminder.time", "-60").unwrap();
        assert_eq!(cfg.reminder.day, 5);
        assert_eq!(cfg.ui.widget_opacity, 0.5);
        assert_eq!(cfg.reminder.time, -60);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("ui.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set_value("", "value"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set_value("ui", "value"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_value_rejects_out_of_range_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        let before = cfg.clone();
        assert!(cfg.set_value("reminder.day", "8").is_err());
        assert!(cfg.set_value("reminder.day", "0").is_err());
        assert!(cfg.set_value("reminder.day", "monday").is_err());
        assert!(cfg.set_value("ui.widget_opacity", "1.5").is_err());
        assert!(cfg.set_value("ui.theme", "sepia").is_err());
        assert_eq!(cfg, before);
    }

    #[test]
    fn save_reminder_appends_to_habit_log() {
        let mut cfg = Config::default();
        cfg.save_reminder(1_723_700_000, 3).unwrap();
        cfg.save_reminder(1_723_700_120, 3).unwrap();
        assert_eq!(cfg.reminder.time, 1_723_700_120);
        assert_eq!(cfg.reminder.day, 3);
        assert_eq!(cfg.habit.selected_times, "1723700000,1723700120");
        assert_eq!(cfg.habit_log().len(), 2);
    }

    #[test]
    fn save_reminder_rejects_bad_day() {
        let mut cfg = Config::default();
        assert_eq!(cfg.save_reminder(0, 0), Err(ValidationError::DayOutOfRange(0)));
        assert!(cfg.habit.selected_times.is_empty());
    }

    #[test]
    fn suggestion_after_three_similar_saves() {
        let mut cfg = Config::default();
        cfg.save_reminder(1_723_700_400, 2).unwrap();
        assert!(cfg.suggestion().is_none());
        cfg.save_reminder(1_723_700_450, 2).unwrap();
        cfg.save_reminder(1_723_720_000, 2).unwrap();
        assert!(cfg.suggestion().is_none());
        cfg.save_reminder(1_723_700_500, 2).unwrap();

        let applied = cfg.accept_suggestion().unwrap();
        assert_eq!(applied.reminder_time, 1_723_700_400);
        assert_eq!(cfg.reminder.time, 1_723_700_400);
        assert_eq!(cfg.habit_log().len(), 4);
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        cfg.save_reminder(1_723_700_000, 6).unwrap();
        cfg.set_value("ui.theme", "Dark").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.reminder.time, 1_723_700_000);
        assert_eq!(reloaded.reminder.day, 6);
        assert_eq!(reloaded.ui.theme, WidgetTheme::Dark);
        assert_eq!(reloaded, cfg);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reminder = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));

        std::fs::write(&path, "[reminder]\nday = 9\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }
}
