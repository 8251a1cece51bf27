//! # LexIntake Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the calendar, the language model,
//!   notification channels and the appointment log
//! - The scheduling engine (business hours, conflicts, slot search)
//! - The intake workflow, the conversational assistant and reminders
//!
//! ## Architecture Principles
//! - Only depends on `lexintake-domain`
//! - No HTTP, SMTP or filesystem code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod intake;
pub mod notification;
pub mod reminders;
pub mod scheduling;

// Collaborator ports
pub mod calendar_ports;
pub mod clock;
pub mod llm_ports;

#[cfg(test)]
pub(crate) mod testing;

pub use calendar_ports::CalendarClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use intake::{AppointmentLog, BookingOutcome, IntakeAssistant, IntakeService};
pub use llm_ports::LanguageModel;
pub use notification::{NotificationDispatcher, Notifier};
pub use reminders::ReminderService;
pub use scheduling::{ConflictChecker, NextSlotFinder, SchedulingService};
