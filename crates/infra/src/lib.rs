//! # LexIntake Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - External service integrations (Google Calendar, OpenAI, Telegram,
//!   SMTP email behind the `email` feature)
//! - File-backed appointment log
//! - Configuration loading and the cron reminder scheduler
//!
//! ## Architecture
//! - Implements traits defined in `lexintake-core`
//! - Depends on `lexintake-domain` and `lexintake-core`
//! - Contains all "impure" code (network, filesystem, timers)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;
pub mod storage;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
#[cfg(feature = "email")]
pub use integrations::email::SmtpEmailNotifier;
pub use integrations::calendar::GoogleCalendarClient;
pub use integrations::openai::OpenAIClient;
pub use integrations::telegram::TelegramNotifier;
pub use scheduling::{ReminderScheduler, ReminderSchedulerConfig, SchedulerError};
pub use storage::JsonlAppointmentLog;
