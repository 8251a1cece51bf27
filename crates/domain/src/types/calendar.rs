//! Calendar collaborator records

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::EVENT_SUMMARY_PREFIX;
use crate::impl_domain_status_conversions;
use crate::types::scheduling::{AppointmentRequest, AppointmentSlot};

/// Lifecycle state reported by the calendar provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl_domain_status_conversions!(EventStatus {
    Confirmed => "confirmed",
    Tentative => "tentative",
    Cancelled => "cancelled",
});

/// Event as read back from the calendar.
///
/// Only the fields the scheduler and the reminder sweep look at are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub status: EventStatus,
    /// `None` for all-day events.
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub html_link: Option<String>,
    pub attendees: Vec<String>,
}

impl CalendarEvent {
    /// Whether this event still occupies its time range.
    pub fn is_blocking(&self) -> bool {
        self.status != EventStatus::Cancelled
    }
}

/// Event body sent to the calendar when an appointment is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCalendarEvent {
    pub summary: String,
    pub description: String,
    pub slot: AppointmentSlot,
    pub attendees: Vec<String>,
}

impl NewCalendarEvent {
    pub fn for_appointment(
        request: &AppointmentRequest,
        slot: AppointmentSlot,
        attendee: Option<&str>,
    ) -> Self {
        Self {
            summary: format!(
                "{EVENT_SUMMARY_PREFIX} - {} ({})",
                request.client_name, request.phone
            ),
            description: format!("{}\n\nTelefone: {}", request.details, request.phone),
            slot,
            attendees: attendee.map(|email| vec![email.to_string()]).unwrap_or_default(),
        }
    }

    /// IANA name of the timezone the slot is expressed in.
    pub fn timezone_name(&self) -> &'static str {
        self.slot.start().timezone().name()
    }
}
