//! Upcoming-appointment reminders

pub mod service;

pub use service::ReminderService;
