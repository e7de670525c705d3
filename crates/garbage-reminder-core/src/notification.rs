//! Weekly reminder notifications.
//!
//! A reminder is a weekday plus a wall-clock hour and minute, taken from the
//! saved reminder time in the user's time zone. Requests go to a
//! [`NotificationCenter`]; the CLI uses [`FileNotificationCenter`], which
//! keeps pending requests in the shared data directory.
//!
//! Scheduling failures are never fatal. Callers go through
//! [`schedule_or_log`], which logs the error and carries on.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bin_week::BinLabel;
use crate::error::{NotificationError, ValidationError};
use crate::i18n::localize;
use crate::storage::{data_dir, Config};

/// Pending request store file name.
const NOTIFICATIONS_FILE: &str = "notifications.json";

/// Identifier prefix for reminders saved from the settings surface.
pub const CUSTOM_REMINDER_PREFIX: &str = "CustomWeeklyBinReminder";

/// Identifier prefix for reminders added by the home surface.
pub const HOME_REMINDER_PREFIX: &str = "WeeklyBinReminder";

/// Notification sound choice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sound {
    #[default]
    Default,
    Chime,
    Alert,
    Silent,
}

impl Sound {
    pub const ALL: [Sound; 4] = [Sound::Default, Sound::Chime, Sound::Alert, Sound::Silent];

    pub fn name(&self) -> &'static str {
        match self {
            Sound::Default => "Default",
            Sound::Chime => "Chime",
            Sound::Alert => "Alert",
            Sound::Silent => "Silent",
        }
    }

    /// Bundled sound file played for this choice.
    pub fn file_name(&self) -> String {
        format!("{}.caf", self.name())
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sound {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sound::ALL
            .into_iter()
            .find(|sound| sound.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "sound".into(),
                message: format!("unknown sound '{s}'"),
            })
    }
}

/// Calendar fields a repeating notification matches on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyTrigger {
    /// 1 = Sunday .. 7 = Saturday.
    pub weekday: u8,
    pub hour: u32,
    pub minute: u32,
}

impl WeeklyTrigger {
    /// Validated trigger.
    pub fn new(weekday: u8, hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if !(1..=7).contains(&weekday) {
            return Err(ValidationError::DayOutOfRange(i64::from(weekday)));
        }
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            weekday,
            hour,
            minute,
        })
    }

    /// Trigger for `day`, firing at the wall-clock time of `reminder_time`
    /// (epoch seconds) in `tz`.
    pub fn from_reminder<Tz: TimeZone>(
        reminder_time: i64,
        day: u8,
        tz: &Tz,
    ) -> Result<Self, ValidationError> {
        let local = tz
            .timestamp_opt(reminder_time, 0)
            .single()
            .ok_or_else(|| ValidationError::InvalidTime(reminder_time.to_string()))?;
        Self::new(day, local.hour(), local.minute())
    }

    /// First instant strictly after `now` matching this trigger. Local times
    /// skipped by a DST change are passed over to the following week.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let today = now.date_naive();
        (0..=14).find_map(|offset| {
            let date = today + Duration::days(offset);
            if date.weekday().number_from_sunday() != u32::from(self.weekday) {
                return None;
            }
            let naive = date.and_hms_opt(self.hour, self.minute, 0)?;
            let candidate = tz.from_local_datetime(&naive).earliest()?;
            (candidate > *now).then_some(candidate)
        })
    }
}

impl fmt::Display for WeeklyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = crate::i18n::WEEKDAYS
            .get(usize::from(self.weekday).saturating_sub(1))
            .copied()
            .unwrap_or("?");
        write!(f, "every {day} at {:02}:{:02}", self.hour, self.minute)
    }
}

/// A repeating local notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRequest {
    pub identifier: String,
    pub title: String,
    pub body: String,
    /// Sound file name; `None` plays the system default.
    pub sound: Option<String>,
    pub trigger: WeeklyTrigger,
    pub repeats: bool,
}

impl NotificationRequest {
    /// Reminder saved from the settings surface. Saving again for the same
    /// day replaces the previous request.
    pub fn custom_reminder<Tz: TimeZone>(config: &Config, tz: &Tz) -> Result<Self, ValidationError> {
        let lang = config.ui.language;
        let trigger = WeeklyTrigger::from_reminder(config.reminder.time, config.reminder.day, tz)?;
        Ok(Self {
            identifier: format!("{CUSTOM_REMINDER_PREFIX}-{}", config.reminder.day),
            title: localize(lang, "Garbage Bin Reminder").to_string(),
            body: localize(lang, "Remember to place the correct bins outside.").to_string(),
            sound: Some(config.notifications.sound.file_name()),
            trigger,
            repeats: true,
        })
    }

    /// Reminder added by the home surface, announcing this week's bins.
    /// Every call yields a fresh identifier.
    pub fn home_reminder<Tz: TimeZone>(
        config: &Config,
        tz: &Tz,
        label: BinLabel,
    ) -> Result<Self, ValidationError> {
        let lang = config.ui.language;
        let trigger = WeeklyTrigger::from_reminder(config.reminder.time, config.reminder.day, tz)?;
        Ok(Self {
            identifier: format!("{HOME_REMINDER_PREFIX}-{}", Uuid::new_v4().hyphenated()),
            title: localize(lang, "Garbage Bin Reminder").to_string(),
            body: label.this_week_message(lang).to_string(),
            sound: None,
            trigger,
            repeats: true,
        })
    }
}

/// Notification permission as last answered by the user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Authorization {
    #[default]
    NotDetermined,
    Authorized,
    Denied,
}

/// Somewhere repeating notifications can be scheduled.
pub trait NotificationCenter {
    /// Ask for permission. Only the first request prompts; later calls
    /// return the recorded answer.
    fn request_authorization(&mut self) -> Result<Authorization, NotificationError>;

    /// Schedule `request`, replacing any pending request with the same
    /// identifier.
    fn add(&mut self, request: NotificationRequest) -> Result<(), NotificationError>;

    fn pending(&self) -> Vec<NotificationRequest>;

    fn remove_all(&mut self) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CenterState {
    #[serde(default)]
    authorization: Authorization,
    #[serde(default)]
    pending: Vec<NotificationRequest>,
}

/// Notification center persisted as JSON.
///
/// There is no system prompt on a terminal: an undetermined permission is
/// granted on first request, and [`FileNotificationCenter::set_authorization`]
/// records an explicit answer.
#[derive(Debug, Clone)]
pub struct FileNotificationCenter {
    path: PathBuf,
    state: CenterState,
}

impl FileNotificationCenter {
    /// Open the store in the shared data directory.
    pub fn open() -> Result<Self, NotificationError> {
        let dir = data_dir().map_err(|e| NotificationError::Store {
            path: PathBuf::from(NOTIFICATIONS_FILE),
            message: e.to_string(),
        })?;
        Self::open_at(&dir.join(NOTIFICATIONS_FILE))
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open_at(path: &Path) -> Result<Self, NotificationError> {
        let store_err = |message: String| NotificationError::Store {
            path: path.to_path_buf(),
            message,
        };
        let state = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| store_err(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CenterState::default(),
            Err(e) => return Err(store_err(e.to_string())),
        };
        Ok(Self {
            path: path.to_path_buf(),
            state,
        })
    }

    pub fn authorization(&self) -> Authorization {
        self.state.authorization
    }

    pub fn set_authorization(&mut self, authorization: Authorization) -> Result<(), NotificationError> {
        self.state.authorization = authorization;
        self.save()
    }

    fn save(&self) -> Result<(), NotificationError> {
        let store_err = |message: String| NotificationError::Store {
            path: self.path.clone(),
            message,
        };
        let content = serde_json::to_string_pretty(&self.state).map_err(|e| store_err(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| store_err(e.to_string()))
    }
}

impl NotificationCenter for FileNotificationCenter {
    fn request_authorization(&mut self) -> Result<Authorization, NotificationError> {
        if self.state.authorization == Authorization::NotDetermined {
            self.set_authorization(Authorization::Authorized)?;
            info!("notification permission granted");
        }
        Ok(self.state.authorization)
    }

    fn add(&mut self, request: NotificationRequest) -> Result<(), NotificationError> {
        if self.state.authorization != Authorization::Authorized {
            return Err(NotificationError::NotAuthorized);
        }
        self.state.pending.retain(|r| r.identifier != request.identifier);
        debug!(identifier = %request.identifier, trigger = %request.trigger, "notification scheduled");
        self.state.pending.push(request);
        self.save()
    }

    fn pending(&self) -> Vec<NotificationRequest> {
        self.state.pending.clone()
    }

    fn remove_all(&mut self) -> Result<(), NotificationError> {
        self.state.pending.clear();
        self.save()
    }
}

/// Ask for permission, logging instead of failing.
pub fn request_authorization_or_log(center: &mut dyn NotificationCenter) -> Authorization {
    match center.request_authorization() {
        Ok(authorization) => authorization,
        Err(e) => {
            warn!(error = %e, "Notification permission error");
            Authorization::NotDetermined
        }
    }
}

/// Schedule `request`, logging instead of failing. Returns whether the
/// request was accepted.
pub fn schedule_or_log(center: &mut dyn NotificationCenter, request: NotificationRequest) -> bool {
    let identifier = request.identifier.clone();
    match center.add(request) {
        Ok(()) => true,
        Err(e) => {
            warn!(identifier = %identifier, error = %e, "Notification scheduling error");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn tokyo() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn config_at(time: i64, day: u8) -> Config {
        let mut config = Config::default();
        config.reminder.time = time;
        config.reminder.day = day;
        config
    }

    #[test]
    fn trigger_uses_local_wall_clock() {
        // 2024-08-15 10:30:00 UTC is 19:30 in UTC+9.
        let ts = Utc.with_ymd_and_hms(2024, 8, 15, 10, 30, 0).unwrap().timestamp();
        let trigger = WeeklyTrigger::from_reminder(ts, 2, &tokyo()).unwrap();
        assert_eq!(trigger, WeeklyTrigger { weekday: 2, hour: 19, minute: 30 });
        let utc_trigger = WeeklyTrigger::from_reminder(ts, 2, &Utc).unwrap();
        assert_eq!(utc_trigger.hour, 10);
    }

    #[test]
    fn trigger_rejects_bad_day() {
        assert_eq!(
            WeeklyTrigger::from_reminder(0, 0, &Utc),
            Err(ValidationError::DayOutOfRange(0))
        );
        assert!(WeeklyTrigger::new(8, 10, 0).is_err());
        assert!(WeeklyTrigger::new(1, 24, 0).is_err());
    }

    #[test]
    fn next_fire_is_strictly_after_now() {
        // Thursday 2024-08-15 08:00 UTC.
        let now = Utc.with_ymd_and_hms(2024, 8, 15, 8, 0, 0).unwrap();
        let thursday_nine = WeeklyTrigger::new(5, 9, 0).unwrap();
        assert_eq!(
            thursday_nine.next_fire_after(&now),
            Some(Utc.with_ymd_and_hms(2024, 8, 15, 9, 0, 0).unwrap())
        );

        let thursday_eight = WeeklyTrigger::new(5, 8, 0).unwrap();
        assert_eq!(
            thursday_eight.next_fire_after(&now),
            Some(Utc.with_ymd_and_hms(2024, 8, 22, 8, 0, 0).unwrap())
        );

        let sunday = WeeklyTrigger::new(1, 18, 45).unwrap();
        assert_eq!(
            sunday.next_fire_after(&now),
            Some(Utc.with_ymd_and_hms(2024, 8, 18, 18, 45, 0).unwrap())
        );
    }

    #[test]
    fn custom_reminder_identifier_is_per_day() {
        let mut config = config_at(0, 3);
        config.notifications.sound = Sound::Chime;
        let request = NotificationRequest::custom_reminder(&config, &Utc).unwrap();
        assert_eq!(request.identifier, "CustomWeeklyBinReminder-3");
        assert_eq!(request.sound.as_deref(), Some("Chime.caf"));
        assert_eq!(request.body, "Remember to place the correct bins outside.");
        assert!(request.repeats);
    }

    #[test]
    fn home_reminder_carries_this_weeks_bins() {
        let config = config_at(0, 1);
        let a = NotificationRequest::home_reminder(&config, &Utc, BinLabel::GeneralAndGreen).unwrap();
        let b = NotificationRequest::home_reminder(&config, &Utc, BinLabel::GeneralAndGreen).unwrap();
        assert!(a.identifier.starts_with("WeeklyBinReminder-"));
        assert_ne!(a.identifier, b.identifier);
        assert_eq!(a.body, "This Week: General Waste & Green Waste");
        assert_eq!(a.sound, None);
    }

    #[test]
    fn file_center_replaces_same_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(NOTIFICATIONS_FILE);
        let mut center = FileNotificationCenter::open_at(&path).unwrap();
        assert_eq!(center.request_authorization().unwrap(), Authorization::Authorized);

        let config = config_at(0, 2);
        center.add(NotificationRequest::custom_reminder(&config, &Utc).unwrap()).unwrap();
        let config = config_at(3600, 2);
        center.add(NotificationRequest::custom_reminder(&config, &Utc).unwrap()).unwrap();

        let reopened = FileNotificationCenter::open_at(&path).unwrap();
        let pending = reopened.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].trigger.hour, 1);
        assert_eq!(reopened.authorization(), Authorization::Authorized);
    }

    #[test]
    fn denied_permission_is_logged_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut center = FileNotificationCenter::open_at(&dir.path().join(NOTIFICATIONS_FILE)).unwrap();
        center.set_authorization(Authorization::Denied).unwrap();
        assert_eq!(request_authorization_or_log(&mut center), Authorization::Denied);

        let request = NotificationRequest::custom_reminder(&config_at(0, 1), &Utc).unwrap();
        assert!(!schedule_or_log(&mut center, request));
        assert!(center.pending().is_empty());
    }

    #[test]
    fn remove_all_clears_pending() {
        let dir = tempfile::tempdir().unwrap();
        let mut center = FileNotificationCenter::open_at(&dir.path().join(NOTIFICATIONS_FILE)).unwrap();
        center.request_authorization().unwrap();
        let request = NotificationRequest::custom_reminder(&config_at(0, 1), &Utc).unwrap();
        assert!(schedule_or_log(&mut center, request));
        center.remove_all().unwrap();
        assert!(center.pending().is_empty());
    }

    #[test]
    fn sound_names_parse() {
        assert_eq!("chime".parse::<Sound>().unwrap(), Sound::Chime);
        assert!("klaxon".parse::<Sound>().is_err());
        assert_eq!(Sound::Silent.file_name(), "Silent.caf");
    }
}
