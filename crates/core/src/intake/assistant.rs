//! One conversational turn with a visitor.
//!
//! The dialogue itself is driven by the system prompt; this module only
//! tracks contact data, the visitor's practice area and the two one-shot
//! side effects (scheduling link, staff transcript).

use std::sync::Arc;

use lexintake_domain::constants::{
    INTENT_TEMPERATURE, INTENT_UNKNOWN, REPLY_TEMPERATURE, SCHEDULING_CUE,
};
use lexintake_domain::{
    extract_name, format_phone, ChatMessage, ConversationContext, FirmConfig, IntakeStage,
};
use tracing::{debug, info, warn};

use super::prompt::{greeting, intent_prompt, system_prompt};
use crate::llm_ports::LanguageModel;
use crate::notification::messages::transcript_notice;
use crate::notification::NotificationDispatcher;

/// Shown when the language model cannot be reached.
pub const FALLBACK_REPLY: &str =
    "Desculpe, estou com dificuldades técnicas no momento. Por favor, tente novamente em instantes.";

/// Drives the intake conversation
pub struct IntakeAssistant {
    model: Arc<dyn LanguageModel>,
    notifications: Arc<NotificationDispatcher>,
    firm: FirmConfig,
}

impl IntakeAssistant {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        notifications: Arc<NotificationDispatcher>,
        firm: FirmConfig,
    ) -> Self {
        Self { model, notifications, firm }
    }

    /// Fresh context seeded with the firm's system prompt.
    pub fn start_conversation(&self) -> ConversationContext {
        ConversationContext::new(system_prompt(&self.firm))
    }

    pub fn greeting(&self) -> String {
        greeting(&self.firm)
    }

    /// Process one visitor message and produce the assistant's reply.
    ///
    /// When the model fails the visitor's message stays in the history, no
    /// assistant message is recorded and [`FALLBACK_REPLY`] is returned.
    pub async fn respond(
        &self,
        mut context: ConversationContext,
        user_text: &str,
    ) -> (ConversationContext, String) {
        context.history.push(ChatMessage::user(user_text));

        if context.client.intent.is_none() {
            context.client.intent = Some(self.classify_intent(user_text).await);
        }

        if context.stage == IntakeStage::CollectingContact {
            self.capture_contact(&mut context, user_text);
        }

        let mut reply = match self.model.complete(&context.history, REPLY_TEMPERATURE).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "Language model unavailable, sending fallback reply");
                return (context, FALLBACK_REPLY.to_string());
            }
        };

        if !context.scheduling_offered && reply.to_lowercase().contains(SCHEDULING_CUE) {
            if let Some(link) = &self.firm.scheduling_link {
                reply.push_str(&format!("\n\n\u{1F4C5} [Agendar reunião aqui]({link})"));
            }
            context.scheduling_offered = true;
            debug!("Scheduling offered to visitor");
        }
        context.history.push(ChatMessage::assistant(reply.clone()));

        if context.stage == IntakeStage::Subject
            && !context.scheduling_offered
            && !context.staff_notified
        {
            let notice =
                transcript_notice(context.client.name.as_deref(), context.visible_messages());
            context.staff_notified = self.notifications.dispatch(&notice).await > 0;
        }

        (context, reply)
    }

    /// Map a visitor message onto one of the firm's practice areas, or
    /// `"Não identificado"`.
    pub async fn classify_intent(&self, message: &str) -> String {
        let prompt = [ChatMessage::user(intent_prompt(message, &self.firm.practice_areas))];
        let answer = match self.model.complete(&prompt, INTENT_TEMPERATURE).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "Intent classification failed");
                return INTENT_UNKNOWN.to_string();
            }
        };

        let lowered = answer.to_lowercase();
        let intent = self
            .firm
            .practice_areas
            .iter()
            .find(|area| lowered.contains(&area.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| INTENT_UNKNOWN.to_string());
        info!(intent = %intent, "Classified visitor intent");
        intent
    }

    fn capture_contact(&self, context: &mut ConversationContext, user_text: &str) {
        if context.client.name.is_none() {
            context.client.name = extract_name(user_text);
        }
        if context.client.phone.is_none() {
            context.client.phone = format_phone(user_text);
        }
        if context.client.has_contact() {
            context.stage = IntakeStage::Subject;
            debug!("Contact data complete");
        }
    }
}
