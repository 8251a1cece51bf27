//! Client intake: conversation turns and the booking workflow

pub mod assistant;
pub mod ports;
pub mod prompt;
pub mod service;

pub use assistant::IntakeAssistant;
pub use ports::AppointmentLog;
pub use service::{phone_from_history, BookingOutcome, IntakeService};
