//! Intake booking workflow - scheduling plus staff notification and the
//! appointment log.

use std::sync::Arc;

use lexintake_domain::constants::PHONE_NOT_INFORMED;
use lexintake_domain::{
    format_phone, parse_confirmation_blocks, redact_contact, AppointmentRecord, AppointmentRequest,
    AppointmentSlot, AppointmentStatus, ChatMessage, ChatRole, SchedulingResult,
};
use tracing::{error, info};

use super::ports::AppointmentLog;
use crate::clock::{Clock, SystemClock};
use crate::notification::messages::{confirmation_notice, urgent_notice};
use crate::notification::NotificationDispatcher;
use crate::scheduling::SchedulingService;

/// Result of one booking through the intake workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    /// Final scheduling result, after any automatic retry.
    pub result: SchedulingResult,
    /// Alternative offered by the first attempt, if any.
    pub suggested: Option<AppointmentSlot>,
    /// Whether at least one staff channel accepted the notice.
    pub staff_notified: bool,
}

/// Books appointments and keeps staff informed
pub struct IntakeService {
    scheduler: Arc<SchedulingService>,
    notifications: Arc<NotificationDispatcher>,
    log: Arc<dyn AppointmentLog>,
    clock: Arc<dyn Clock>,
    auto_accept_suggestion: bool,
}

impl IntakeService {
    pub fn new(
        scheduler: Arc<SchedulingService>,
        notifications: Arc<NotificationDispatcher>,
        log: Arc<dyn AppointmentLog>,
    ) -> Self {
        Self {
            scheduler,
            notifications,
            log,
            clock: Arc::new(SystemClock),
            auto_accept_suggestion: true,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// When the first attempt yields a suggestion, book it with one more
    /// attempt instead of returning it.
    pub fn with_auto_accept_suggestion(mut self, enabled: bool) -> Self {
        self.auto_accept_suggestion = enabled;
        self
    }

    /// Schedule `request`, notify staff and log confirmed bookings.
    ///
    /// Notification and log failures are logged and never change the
    /// scheduling result.
    pub async fn book(&self, request: &AppointmentRequest) -> BookingOutcome {
        let mut result = self.scheduler.schedule_appointment(request).await;
        let mut suggested = None;

        if let SchedulingResult::Suggested { slot } = result {
            suggested = Some(slot);
            if self.auto_accept_suggestion {
                info!(suggested = %slot.display_text(), "Accepting suggested slot");
                let retry = request.with_preferred_time(slot.display_text());
                result = self.scheduler.schedule_appointment(&retry).await;
            }
        }

        let staff_notified = match &result {
            SchedulingResult::Urgent => self.notifications.dispatch(&urgent_notice(request)).await > 0,
            SchedulingResult::Confirmed { slot, link } => {
                let delivered = self
                    .notifications
                    .dispatch(&confirmation_notice(request, slot, link))
                    .await
                    > 0;
                self.record(request, slot, delivered).await;
                delivered
            }
            SchedulingResult::Suggested { .. } | SchedulingResult::Rejected { .. } => false,
        };

        BookingOutcome { result, suggested, staff_notified }
    }

    /// Book every confirmation block found in an assistant reply.
    ///
    /// The phone number comes from the visitor's messages in `history`.
    pub async fn book_from_reply(
        &self,
        history: &[ChatMessage],
        reply: &str,
    ) -> Vec<BookingOutcome> {
        let phone = phone_from_history(history);
        let mut outcomes = Vec::new();
        for booking in parse_confirmation_blocks(reply) {
            let request = booking.into_request(phone.clone());
            outcomes.push(self.book(&request).await);
        }
        info!(bookings = outcomes.len(), phone = %redact_contact(&phone), "Processed confirmation reply");
        outcomes
    }

    async fn record(&self, request: &AppointmentRequest, slot: &AppointmentSlot, delivered: bool) {
        let record = AppointmentRecord {
            recorded_at: self.clock.now(),
            client_name: request.client_name.clone(),
            details: request.details.clone(),
            scheduled_for: slot.confirmation_text(),
            status: if delivered { AppointmentStatus::Success } else { AppointmentStatus::Failure },
        };
        if let Err(err) = self.log.append(&record).await {
            error!(error = %err, "Failed to append appointment record");
        }
    }
}

/// First phone number written by the visitor, formatted, or
/// `"Não informado"`.
pub fn phone_from_history(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter(|message| message.role == ChatRole::User)
        .find_map(|message| format_phone(&message.content))
        .unwrap_or_else(|| PHONE_NOT_INFORMED.to_string())
}
