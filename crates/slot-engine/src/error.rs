//! Error types for slot-engine operations.
//!
//! "No slot found" and "conflict detected" are decision statuses, not errors.
//! Everything here is raised synchronously at the point of malformed input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
