//! CLI commands. Each one takes the [`AppContext`](crate::AppContext) and
//! writes its human-readable output to the given writer.

pub mod chat;
pub mod reminders;
pub mod schedule;

pub use chat::run_chat;
pub use reminders::{run_reminder_scheduler, sweep_once};
pub use schedule::{render_outcome, schedule};
