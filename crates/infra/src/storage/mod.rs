//! File-backed persistence

pub mod appointment_log;

pub use appointment_log::JsonlAppointmentLog;
