//! Error types for the nucleus_core library.

use crate::Weekday;
use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nucleus_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A string did not name a known value of a closed set
    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// Update addressed a day the schedule does not contain
    #[error("No workout scheduled for {0}")]
    DayNotFound(Weekday),

    /// A schedule listed the same weekday twice
    #[error("Duplicate entry for {0} in schedule")]
    DuplicateDay(Weekday),

    /// The schedule file exists but does not hold a valid schedule
    #[error("Schedule file {path:?} is unreadable: {message}")]
    CorruptSchedule { path: PathBuf, message: String },

    /// Malformed row in an imported plan
    #[error("Import error at line {line}: {message}")]
    Import { line: usize, message: String },
}
