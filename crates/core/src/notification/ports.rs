//! Notification port definitions

use async_trait::async_trait;
use lexintake_domain::{NotificationMessage, Result};

/// One outbound messaging channel (chat bot, email, ...)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs, e.g. `"telegram"`.
    fn channel(&self) -> &'static str;

    /// Deliver `message` to `recipient` (chat id, mailbox, ...).
    async fn notify(&self, recipient: &str, message: &NotificationMessage) -> Result<()>;
}
