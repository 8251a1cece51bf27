//! Scheduling orchestrator - composes parsing, validation, conflict
//! detection and slot search into one booking attempt.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lexintake_domain::constants::URGENCY_KEYWORDS;
use lexintake_domain::{
    parse_preferred_time, redact_contact, AppointmentRequest, AppointmentSlot,
    BusinessCalendarWindow, NewCalendarEvent, SchedulingConfig, SchedulingError, SchedulingResult,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::conflict::ConflictChecker;
use super::hours::is_business_hour;
use super::slots::{ceil_to_hour, NextSlotFinder};
use crate::calendar_ports::CalendarClient;
use crate::clock::{Clock, SystemClock};

/// Whether the preferred-time text asks for immediate attention.
pub fn is_urgent(preferred_time: &str) -> bool {
    let lowered = preferred_time.to_lowercase();
    URGENCY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Appointment scheduling service
///
/// One call performs a sequence of calendar reads followed by at most one
/// write. Reads and the write are not atomic; enable
/// [`with_serialized_writes`](Self::with_serialized_writes) to hold a single
/// lock across the whole attempt.
pub struct SchedulingService {
    calendar: Arc<dyn CalendarClient>,
    checker: ConflictChecker,
    finder: NextSlotFinder,
    window: BusinessCalendarWindow,
    clock: Arc<dyn Clock>,
    calendar_id: String,
    attendee: Option<String>,
    write_lock: Option<Mutex<()>>,
}

impl SchedulingService {
    /// Create a scheduling service for `calendar_id` using the default
    /// business window and the system clock.
    pub fn new(calendar: Arc<dyn CalendarClient>, calendar_id: impl Into<String>) -> Self {
        let calendar_id = calendar_id.into();
        let window = BusinessCalendarWindow::default();
        let checker = ConflictChecker::new(calendar.clone(), calendar_id.clone());
        Self {
            finder: NextSlotFinder::new(checker.clone(), window.clone()),
            checker,
            calendar,
            window,
            clock: Arc::new(SystemClock),
            calendar_id,
            attendee: None,
            write_lock: None,
        }
    }

    /// Build the service from the `scheduling` configuration section.
    pub fn from_config(calendar: Arc<dyn CalendarClient>, config: &SchedulingConfig) -> Self {
        Self::new(calendar, config.calendar_id.clone())
            .with_window(config.window.clone())
            .with_attendee(config.attendee_email.clone())
            .with_serialized_writes(config.serialize_writes)
    }

    pub fn with_window(mut self, window: BusinessCalendarWindow) -> Self {
        self.finder = NextSlotFinder::new(self.checker.clone(), window.clone());
        self.window = window;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Staff address invited to every committed event.
    pub fn with_attendee(mut self, attendee: Option<String>) -> Self {
        self.attendee = attendee;
        self
    }

    pub fn with_serialized_writes(mut self, enabled: bool) -> Self {
        self.write_lock = enabled.then(|| Mutex::new(()));
        self
    }

    pub fn window(&self) -> &BusinessCalendarWindow {
        &self.window
    }

    /// Run one scheduling attempt.
    ///
    /// Never fails: every problem is folded into
    /// [`SchedulingResult::Rejected`]. Accepting a suggestion is a new call.
    pub async fn schedule_appointment(&self, request: &AppointmentRequest) -> SchedulingResult {
        if is_urgent(&request.preferred_time) {
            info!(phone = %redact_contact(&request.phone), "Urgent request, skipping calendar");
            return SchedulingResult::Urgent;
        }

        let _guard = match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let result = self.attempt(request).await.unwrap_or_else(SchedulingResult::rejected);
        match &result {
            SchedulingResult::Rejected { reason } => warn!(
                phone = %redact_contact(&request.phone),
                reason = reason.label(),
                error = %reason,
                "Scheduling attempt rejected"
            ),
            other => info!(
                phone = %redact_contact(&request.phone),
                outcome = other.label(),
                "Scheduling attempt finished"
            ),
        }
        result
    }

    async fn attempt(
        &self,
        request: &AppointmentRequest,
    ) -> Result<SchedulingResult, SchedulingError> {
        let now = self.clock.now();
        let start = parse_preferred_time(&request.preferred_time, self.window.timezone, now)?;

        if start.with_timezone(&Utc) < now {
            debug!(requested = %start, "Requested time already passed");
            return self.suggest_from(start, SchedulingError::OutOfHours).await;
        }

        if !is_business_hour(&self.window, &start) {
            debug!(requested = %start, "Requested time outside business hours");
            return self.suggest_from(start, SchedulingError::OutOfHours).await;
        }

        let slot = AppointmentSlot::starting_at(start);
        if self.checker.has_conflict(&slot).await? {
            debug!(requested = %start, "Requested slot already taken");
            return self.suggest_from(start, SchedulingError::Conflict).await;
        }

        let event = NewCalendarEvent::for_appointment(request, slot, self.attendee.as_deref());
        let created = self
            .calendar
            .insert_event(&self.calendar_id, &event)
            .await
            .map_err(|err| SchedulingError::EventCreation(err.to_string()))?;

        debug!(event_id = %created.id, slot = %slot.confirmation_text(), "Calendar event created");
        Ok(SchedulingResult::Confirmed { slot, link: created.html_link.unwrap_or_default() })
    }

    /// Suggest the next free slot, reporting `exhausted` when none exists.
    ///
    /// The search never starts before the next whole hour from now.
    async fn suggest_from(
        &self,
        from: DateTime<Tz>,
        exhausted: SchedulingError,
    ) -> Result<SchedulingResult, SchedulingError> {
        let earliest = ceil_to_hour(self.clock.now().with_timezone(&self.window.timezone));
        match self.finder.find_from(from.max(earliest)).await {
            Ok(slot) => Ok(SchedulingResult::Suggested { slot }),
            Err(SchedulingError::NoSlotAvailable) => Err(exhausted),
            Err(other) => Err(other),
        }
    }
}
