//! Error types for timetable operations.
//!
//! Conflict detection and text generation never fail; these errors come from
//! parsing wall-clock times, building export options, editing the state store
//! and reading or writing the persisted document.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid time '{0}': expected HH:MM (24-hour)")]
    InvalidTime(String),

    #[error("End time must be after start time ({start} - {end})")]
    InvalidTimeRange { start: String, end: String },

    #[error("Invalid export options: {0}")]
    InvalidOptions(String),

    /// A record failed the checks applied at the editing boundary.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The persisted document parsed as JSON but does not have the expected shape.
    #[error("Invalid JSON structure. The file does not match the expected format.")]
    InvalidDocument,

    #[error("Invalid JSON file. Please check the file and try again. ({0})")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl TimetableError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TimetableError::Validation {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        TimetableError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TimetableError>;
