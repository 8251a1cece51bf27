//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LexIntake
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum IntakeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for LexIntake operations
pub type Result<T> = std::result::Result<T, IntakeError>;

/// A preferred-time expression that could not be turned into an instant.
///
/// Carries the caller's original text so the rejection can be shown back to
/// the client verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("unsupported time format: {input}")]
pub struct ParseError {
    pub input: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

/// Outcomes of the scheduling engine that stop a booking attempt.
///
/// `Display` is the human-readable reason shown to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SchedulingError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("out of hours, no alternative")]
    OutOfHours,

    #[error("conflict, no alternative")]
    Conflict,

    #[error("no free slot within the search horizon")]
    NoSlotAvailable,

    #[error("calendar unavailable: {0}")]
    CalendarUnavailable(String),

    #[error("failed to create calendar event: {0}")]
    EventCreation(String),
}

impl SchedulingError {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::OutOfHours => "out_of_hours",
            Self::Conflict => "conflict",
            Self::NoSlotAvailable => "no_slot_available",
            Self::CalendarUnavailable(_) => "calendar_unavailable",
            Self::EventCreation(_) => "event_creation",
        }
    }

    /// Whether the client can fix this by supplying another time.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::OutOfHours | Self::Conflict)
    }
}
