//! # LexIntake Domain
//!
//! Business domain types and models for LexIntake.
//!
//! This crate contains:
//! - Domain data types (AppointmentSlot, SchedulingResult, CalendarEvent, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - The preferred-time parser and other pure text utilities
//!
//! ## Architecture
//! - No dependencies on other LexIntake crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::confirmation::{has_confirmation_marker, parse_confirmation_blocks};
pub use utils::contact::{extract_name, format_phone};
pub use utils::redact::redact_contact;
pub use utils::time_parser::parse_preferred_time;
