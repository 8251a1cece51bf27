//! Scheduling engine inputs and outcomes

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::SLOT_DURATION_MINUTES;
use crate::errors::SchedulingError;

/// A booking attempt as received from the intake front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub client_name: String,
    /// Free text such as `"10/05/2025 às 10h"`.
    pub preferred_time: String,
    pub details: String,
    pub phone: String,
}

impl AppointmentRequest {
    pub fn new(
        client_name: impl Into<String>,
        preferred_time: impl Into<String>,
        details: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            preferred_time: preferred_time.into(),
            details: details.into(),
            phone: phone.into(),
        }
    }

    /// Same client and details, different preferred time.
    pub fn with_preferred_time(&self, preferred_time: impl Into<String>) -> Self {
        Self { preferred_time: preferred_time.into(), ..self.clone() }
    }
}

/// A contiguous hour-long interval on the business calendar.
///
/// The end is always derived from the start, so a slot can never carry a
/// different duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppointmentSlot {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl AppointmentSlot {
    pub fn starting_at(start: DateTime<Tz>) -> Self {
        let end = start + chrono::Duration::minutes(SLOT_DURATION_MINUTES);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// Suggestion text in the same format the time parser accepts.
    pub fn display_text(&self) -> String {
        self.start.format("%d/%m/%Y às %Hh").to_string()
    }

    /// Date and time shown once an appointment is booked.
    pub fn confirmation_text(&self) -> String {
        self.start.format("%d/%m/%Y %H:%M").to_string()
    }
}

/// Outcome of one scheduling attempt. Exactly one variant per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SchedulingResult {
    /// Event committed to the calendar.
    Confirmed { slot: AppointmentSlot, link: String },
    /// Requested time unavailable; the caller may retry with this slot.
    Suggested { slot: AppointmentSlot },
    /// The client asked for immediate attention.
    Urgent,
    Rejected { reason: SchedulingError },
}

impl SchedulingResult {
    pub fn rejected(reason: impl Into<SchedulingError>) -> Self {
        Self::Rejected { reason: reason.into() }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed { .. } => "confirmed",
            Self::Suggested { .. } => "suggested",
            Self::Urgent => "urgent",
            Self::Rejected { .. } => "rejected",
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Human-readable line suitable for showing to the client.
    pub fn summary(&self) -> String {
        match self {
            Self::Confirmed { slot, link } => {
                format!("Appointment confirmed for {} ({link})", slot.confirmation_text())
            }
            Self::Suggested { slot } => {
                format!("Requested time unavailable. Suggested: {}", slot.display_text())
            }
            Self::Urgent => "Marked as urgent. Our team will contact you shortly.".to_string(),
            Self::Rejected { reason } => format!("Could not schedule: {reason}"),
        }
    }
}
