//! Calendar conflict detection

use std::sync::Arc;

use chrono::Utc;
use lexintake_domain::{AppointmentSlot, SchedulingError};
use tracing::{debug, warn};

use crate::calendar_ports::CalendarClient;

/// Answers "is this slot taken?" with one calendar read.
#[derive(Clone)]
pub struct ConflictChecker {
    calendar: Arc<dyn CalendarClient>,
    calendar_id: String,
}

impl ConflictChecker {
    pub fn new(calendar: Arc<dyn CalendarClient>, calendar_id: impl Into<String>) -> Self {
        Self { calendar, calendar_id: calendar_id.into() }
    }

    /// `true` when any non-cancelled event overlaps `[slot.start, slot.end)`.
    ///
    /// # Errors
    /// A failed calendar read is [`SchedulingError::CalendarUnavailable`],
    /// never "no conflict".
    pub async fn has_conflict(&self, slot: &AppointmentSlot) -> Result<bool, SchedulingError> {
        let events = self
            .calendar
            .list_events(
                &self.calendar_id,
                slot.start().with_timezone(&Utc),
                slot.end().with_timezone(&Utc),
            )
            .await
            .map_err(|err| {
                warn!(error = %err, slot = %slot.display_text(), "Calendar read failed");
                SchedulingError::CalendarUnavailable(err.to_string())
            })?;

        let blocking = events.iter().filter(|event| event.is_blocking()).count();
        debug!(slot = %slot.display_text(), returned = events.len(), blocking, "Checked slot");
        Ok(blocking > 0)
    }
}
