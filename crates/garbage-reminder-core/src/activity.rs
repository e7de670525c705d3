//! Lock-screen live activity.
//!
//! A live activity has constant attributes (the title) and a content state
//! (the bin message) that can be updated until the activity ends. Only one
//! activity is tracked at a time; it is kept in `activity.json` in the
//! shared data directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::bin_week::BinLabel;
use crate::error::{ActivityError, CoreError};
use crate::i18n::{localize, Language};
use crate::storage::data_dir;

const ACTIVITY_FILE: &str = "activity.json";

/// Constant part of the activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityAttributes {
    pub title: String,
}

/// Part of the activity that changes over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContentState {
    pub bin_message: String,
}

impl ContentState {
    pub fn for_week(label: BinLabel, lang: Language) -> Self {
        Self {
            bin_message: label.this_week_message(lang).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiveActivity {
    pub id: String,
    pub attributes: ActivityAttributes,
    pub state: ContentState,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

impl LiveActivity {
    pub fn start(attributes: ActivityAttributes, state: ContentState, now: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4().to_string();
        debug!(%id, "live activity started");
        Self {
            id,
            attributes,
            state,
            started_at: now,
            updated_at: None,
            ended_at: None,
        }
    }

    /// Activity titled with the localized app name, showing this week's bins.
    pub fn start_for_week(label: BinLabel, lang: Language, now: DateTime<Utc>) -> Self {
        let attributes = ActivityAttributes {
            title: localize(lang, "Garbage Bin Reminder").to_string(),
        };
        Self::start(attributes, ContentState::for_week(label, lang), now)
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn update(&mut self, state: ContentState, now: DateTime<Utc>) -> Result<(), ActivityError> {
        self.ensure_active()?;
        self.state = state;
        self.updated_at = Some(now);
        Ok(())
    }

    pub fn end(&mut self, now: DateTime<Utc>) -> Result<(), ActivityError> {
        self.ensure_active()?;
        self.ended_at = Some(now);
        debug!(id = %self.id, "live activity ended");
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), ActivityError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ActivityError::AlreadyEnded { id: self.id.clone() })
        }
    }

    /// Lock screen banner: title over message.
    pub fn render_lock_screen(&self) -> String {
        format!("{}\n{}", self.attributes.title, self.state.bin_message)
    }
}

/// Where the tracked activity is persisted.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    pub fn open() -> Result<Self, CoreError> {
        Ok(Self::at(&data_dir()?.join(ACTIVITY_FILE)))
    }

    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// The tracked activity, if one was ever started.
    pub fn load(&self) -> Result<Option<LiveActivity>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The tracked activity, or [`ActivityError::NotStarted`].
    pub fn current(&self) -> Result<LiveActivity, CoreError> {
        self.load()?.ok_or_else(|| ActivityError::NotStarted.into())
    }

    pub fn save(&self, activity: &LiveActivity) -> Result<(), CoreError> {
        std::fs::write(&self.path, serde_json::to_string_pretty(activity)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, hour, 0, 0).unwrap()
    }

    #[test]
    fn start_update_end_lifecycle() {
        let mut activity = LiveActivity::start_for_week(BinLabel::GeneralAndGreen, Language::En, at(8));
        assert!(activity.is_active());
        assert_eq!(
            activity.render_lock_screen(),
            "Garbage Bin Reminder\nThis Week: General Waste & Green Waste"
        );

        activity
            .update(ContentState::for_week(BinLabel::RecyclableAndGreen, Language::En), at(9))
            .unwrap();
        assert_eq!(activity.state.bin_message, "This Week: Recyclable Waste & Green Waste");
        assert_eq!(activity.updated_at, Some(at(9)));

        activity.end(at(10)).unwrap();
        assert!(!activity.is_active());
    }

    #[test]
    fn ended_activity_rejects_changes() {
        let mut activity = LiveActivity::start_for_week(BinLabel::GeneralAndGreen, Language::En, at(8));
        activity.end(at(9)).unwrap();
        let id = activity.id.clone();
        assert_eq!(
            activity.update(ContentState { bin_message: "x".into() }, at(10)),
            Err(ActivityError::AlreadyEnded { id: id.clone() })
        );
        assert_eq!(activity.end(at(10)), Err(ActivityError::AlreadyEnded { id }));
    }

    #[test]
    fn localized_title() {
        let activity = LiveActivity::start_for_week(BinLabel::GeneralAndGreen, Language::Zh, at(8));
        assert_eq!(activity.attributes.title, "垃圾桶提醒");
    }

    #[test]
    fn store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActivityStore::at(&dir.path().join(ACTIVITY_FILE));
        assert!(store.load().unwrap().is_none());
        assert!(matches!(
            store.current(),
            Err(CoreError::Activity(ActivityError::NotStarted))
        ));

        let activity = LiveActivity::start_for_week(BinLabel::RecyclableAndGreen, Language::Es, at(8));
        store.save(&activity).unwrap();
        assert_eq!(store.current().unwrap(), activity);
    }
}
