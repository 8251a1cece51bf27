//! Scheduling infrastructure for automated task execution
//!
//! Runs the reminder sweep on a cron schedule. The scheduler has an explicit
//! start/stop lifecycle, tracks its monitor task, supports cancellation and
//! wraps every asynchronous operation in a timeout.

pub mod error;
pub mod reminder_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use reminder_scheduler::{ReminderScheduler, ReminderSchedulerConfig};
