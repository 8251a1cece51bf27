//! Fan-out of one staff message to every configured channel.

use std::sync::Arc;

use lexintake_domain::NotificationMessage;
use tracing::{debug, warn};

use super::ports::Notifier;

struct NotificationTarget {
    notifier: Arc<dyn Notifier>,
    recipient: String,
}

/// Sends staff messages to every registered channel.
///
/// Delivery failures are logged and swallowed; callers only learn how many
/// channels accepted the message.
#[derive(Default)]
pub struct NotificationDispatcher {
    targets: Vec<NotificationTarget>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel together with the recipient it should deliver to.
    pub fn with_target(mut self, notifier: Arc<dyn Notifier>, recipient: impl Into<String>) -> Self {
        self.targets.push(NotificationTarget { notifier, recipient: recipient.into() });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn channels(&self) -> Vec<&'static str> {
        self.targets.iter().map(|target| target.notifier.channel()).collect()
    }

    /// Deliver `message` on every channel, returning the number of channels
    /// that accepted it.
    pub async fn dispatch(&self, message: &NotificationMessage) -> usize {
        let mut delivered = 0;
        for target in &self.targets {
            let channel = target.notifier.channel();
            match target.notifier.notify(&target.recipient, message).await {
                Ok(()) => {
                    debug!(channel, subject = %message.subject, "Staff notification delivered");
                    delivered += 1;
                }
                Err(err) => {
                    warn!(channel, error = %err, subject = %message.subject, "Staff notification failed");
                }
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lexintake_domain::{IntakeError, Result};

    use super::*;

    struct StubNotifier {
        fail: bool,
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        fn channel(&self) -> &'static str {
            if self.fail {
                "broken"
            } else {
                "stub"
            }
        }

        async fn notify(&self, recipient: &str, _message: &NotificationMessage) -> Result<()> {
            if self.fail {
                return Err(IntakeError::Notification("channel down".into()));
            }
            self.sent.lock().unwrap().push(recipient.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn counts_only_successful_channels() {
        let ok = Arc::new(StubNotifier { fail: false, sent: Mutex::new(vec![]) });
        let broken = Arc::new(StubNotifier { fail: true, sent: Mutex::new(vec![]) });
        let dispatcher = NotificationDispatcher::new()
            .with_target(broken, "nobody")
            .with_target(ok.clone(), "chat-42");

        let delivered = dispatcher.dispatch(&NotificationMessage::new("s", "b")).await;

        assert_eq!(delivered, 1);
        assert_eq!(ok.sent.lock().unwrap().as_slice(), ["chat-42".to_string()]);
        assert_eq!(dispatcher.channels(), vec!["broken", "stub"]);
    }

    #[tokio::test]
    async fn empty_dispatcher_delivers_nothing() {
        let dispatcher = NotificationDispatcher::new();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.dispatch(&NotificationMessage::new("s", "b")).await, 0);
    }
}
