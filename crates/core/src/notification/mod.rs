//! Staff notification channels and message texts

pub mod dispatcher;
pub mod messages;
pub mod ports;

pub use dispatcher::NotificationDispatcher;
pub use ports::Notifier;
