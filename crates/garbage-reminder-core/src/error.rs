//! Core error types for garbage-reminder-core.
//!
//! Every fallible operation in the library reports one of the enums below.
//! Notification failures are usually logged and swallowed by the caller, so
//! they carry enough context to be useful in a single log line.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for garbage-reminder-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification scheduling errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Live activity errors
    #[error("Live activity error: {0}")]
    Activity(#[from] ActivityError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The shared data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key that does not name a setting
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Reminder day outside 1 (Sunday) ..= 7 (Saturday)
    #[error("Reminder day must be between 1 and 7, got {0}")]
    DayOutOfRange(i64),

    /// Hour/minute pair that is not a wall-clock time
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Notification scheduling errors.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// The user has not granted (or has denied) notification permission
    #[error("notification permission not granted")]
    NotAuthorized,

    /// The pending request store could not be read or written
    #[error("notification store at {path} unavailable: {message}")]
    Store { path: PathBuf, message: String },
}

/// Live activity errors.
#[derive(Error, Debug, PartialEq)]
pub enum ActivityError {
    /// No activity has been started
    #[error("no live activity is running")]
    NotStarted,

    /// The activity was ended and can no longer change
    #[error("live activity {id} has already ended")]
    AlreadyEnded { id: String },
}
