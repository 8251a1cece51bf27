//! Reminder sweep - notifies staff about appointments starting in about an
//! hour.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use lexintake_domain::{CalendarEvent, ReminderConfig, Result};
use tracing::{debug, info};

use crate::calendar_ports::CalendarClient;
use crate::notification::messages::reminder_notice;
use crate::notification::NotificationDispatcher;

/// Finds events whose start is `lead ± tolerance` away and sends one
/// reminder per event.
///
/// Sweeps are stateless: with the default 15-minute interval and a
/// two-minute acceptance band, each event falls into at most one sweep.
pub struct ReminderService {
    calendar: Arc<dyn CalendarClient>,
    notifications: Arc<NotificationDispatcher>,
    calendar_id: String,
    lookahead: Duration,
    lead: Duration,
    tolerance: Duration,
}

impl ReminderService {
    pub fn new(
        calendar: Arc<dyn CalendarClient>,
        notifications: Arc<NotificationDispatcher>,
        calendar_id: impl Into<String>,
        config: &ReminderConfig,
    ) -> Self {
        Self {
            calendar,
            notifications,
            calendar_id: calendar_id.into(),
            lookahead: Duration::minutes(config.lookahead_minutes),
            lead: Duration::seconds(config.lead_secs),
            tolerance: Duration::seconds(config.tolerance_secs),
        }
    }

    /// Run one sweep at `now`, returning how many events were reminded.
    ///
    /// # Errors
    /// Propagates the calendar read failure; nothing is sent in that case.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<usize> {
        let events =
            self.calendar.list_events(&self.calendar_id, now, now + self.lookahead).await?;

        let mut reminded = 0;
        for event in events.iter().filter(|event| self.is_due(event, now)) {
            let delivered = self.notifications.dispatch(&reminder_notice(event)).await;
            debug!(event_id = %event.id, delivered, "Reminder sent");
            reminded += 1;
        }

        info!(scanned = events.len(), reminded, "Reminder sweep finished");
        Ok(reminded)
    }

    /// Whether `event` is a timed, non-cancelled event starting within the
    /// reminder band.
    pub fn is_due(&self, event: &CalendarEvent, now: DateTime<Utc>) -> bool {
        let Some(start) = event.start else {
            return false;
        };
        if !event.is_blocking() {
            return false;
        }
        let lead = start.with_timezone(&Utc) - now;
        lead >= self.lead - self.tolerance && lead <= self.lead + self.tolerance
    }
}
