//! External service integrations

pub mod calendar;

#[cfg(feature = "email")]
pub mod email;

pub mod openai;
pub mod telegram;
