//! Calendar collaborator port
//!
//! The scheduling engine only ever reads a time range and inserts one event;
//! authentication and credential caching stay behind the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lexintake_domain::{CalendarEvent, NewCalendarEvent, Result};

/// Trait for calendar provider operations
#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Fetch single (expanded) events overlapping `[time_min, time_max)`,
    /// ordered by start time. Cancelled events may be included.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;

    /// Create an event and return it as stored, including its browsable link.
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> Result<CalendarEvent>;
}
