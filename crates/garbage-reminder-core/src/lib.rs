//! # Garbage Reminder Core Library
//!
//! This library provides the logic behind Garbage Reminder: which bins go
//! outside this week, when to remind the user, and the small amount of
//! state shared between the app surfaces. The `garbage-reminder` CLI is a
//! thin layer over the same library.
//!
//! ## Key Components
//!
//! - [`bin_for_date`]: week-of-year parity to [`BinLabel`]
//! - [`habit`]: 10-minute bucketing of past reminder times and the smart
//!   reminder suggestion
//! - [`Config`]: settings shared through the data directory
//! - [`NotificationCenter`]: weekly reminder scheduling
//! - [`widget`]: hourly widget timeline and themes
//! - [`LiveActivity`]: lock-screen activity state

pub mod activity;
pub mod bin_week;
pub mod error;
pub mod habit;
pub mod i18n;
pub mod notification;
pub mod storage;
pub mod widget;

pub use activity::{ActivityAttributes, ActivityStore, ContentState, LiveActivity};
pub use bin_week::{bin_for_date, week_of_year, BinLabel, WeekNumbering};
pub use error::{ActivityError, ConfigError, CoreError, NotificationError, ValidationError};
pub use habit::{HabitLog, Suggestion};
pub use i18n::{localize, Language};
pub use notification::{
    Authorization, FileNotificationCenter, NotificationCenter, NotificationRequest, Sound,
    WeeklyTrigger,
};
pub use storage::Config;
pub use widget::{Timeline, TimelineEntry, WidgetTheme};
