//! Calendar integration
//!
//! Google Calendar adapter for the scheduling engine plus the bearer-token
//! sources it authenticates with.

pub mod auth;
pub mod google;

pub use auth::{
    token_provider_from_config, AccessTokenProvider, StaticTokenProvider, TokenFileProvider,
};
pub use google::GoogleCalendarClient;
