//! SMTP email notifier (feature: email)

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use lexintake_core::Notifier;
use lexintake_domain::{redact_contact, EmailConfig, NotificationMessage, Result};
use tracing::debug;

use crate::errors::InfraError;

/// Port used for implicit TLS; any other port negotiates STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends staff notifications as plain-text email through an SMTP relay.
pub struct SmtpEmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailNotifier {
    /// Build the relay transport and sender mailbox from configuration.
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(InfraError::from)?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();
        let from: Mailbox = config.username.parse().map_err(InfraError::from)?;

        Ok(Self { transport, from })
    }

    fn build_message(&self, recipient: &str, message: &NotificationMessage) -> Result<Message> {
        let to: Mailbox = recipient.parse().map_err(InfraError::from)?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(InfraError::from)?;
        Ok(email)
    }
}

#[async_trait]
impl Notifier for SmtpEmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, recipient: &str, message: &NotificationMessage) -> Result<()> {
        let email = self.build_message(recipient, message)?;
        self.transport.send(email).await.map_err(InfraError::from)?;
        debug!(
            recipient = %redact_contact(recipient),
            subject = %message.subject,
            "Email delivered"
        );
        Ok(())
    }
}
