//! Intake conversation, booking log, and notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;
use crate::types::scheduling::AppointmentRequest;

/// Whether staff were told about a booked appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Success,
    Failure,
}

impl_domain_status_conversions!(AppointmentStatus {
    Success => "success",
    Failure => "failure",
});

/// One line of the append-only appointment log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub recorded_at: DateTime<Utc>,
    pub client_name: String,
    pub details: String,
    pub scheduled_for: String,
    pub status: AppointmentStatus,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Contact data gathered from the visitor so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Practice area (or "not identified") inferred from the first message.
    pub intent: Option<String>,
}

impl ClientData {
    pub fn has_contact(&self) -> bool {
        self.name.is_some() && self.phone.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    CollectingContact,
    Subject,
}

/// Everything a front end must carry between two turns of one visitor's
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub stage: IntakeStage,
    pub client: ClientData,
    /// Full history, system prompt first.
    pub history: Vec<ChatMessage>,
    pub scheduling_offered: bool,
    pub staff_notified: bool,
}

impl ConversationContext {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            stage: IntakeStage::CollectingContact,
            client: ClientData::default(),
            history: vec![ChatMessage::system(system_prompt)],
            scheduling_offered: false,
            staff_notified: false,
        }
    }

    /// Messages exchanged with the visitor, without the system prompt.
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter().filter(|message| message.role != ChatRole::System)
    }
}

/// A booking the assistant confirmed inside its reply, before a phone
/// number is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub preferred_time: String,
    pub details: String,
}

impl BookingRequest {
    pub fn into_request(self, phone: impl Into<String>) -> AppointmentRequest {
        AppointmentRequest::new(self.client_name, self.preferred_time, self.details, phone)
    }
}

/// Staff-facing message delivered by every notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Used as the email subject; chat channels ignore it.
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self { subject: subject.into(), body: body.into() }
    }
}
