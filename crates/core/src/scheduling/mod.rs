//! Appointment scheduling engine

pub mod conflict;
pub mod hours;
pub mod service;
pub mod slots;

pub use conflict::ConflictChecker;
pub use hours::is_business_hour;
pub use service::{is_urgent, SchedulingService};
pub use slots::NextSlotFinder;
