//! Language-model collaborator port

use async_trait::async_trait;
use lexintake_domain::{ChatMessage, Result};

/// Chat-completion capability used by the intake assistant
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Produce the next assistant message for `history`.
    async fn complete(&self, history: &[ChatMessage], temperature: f32) -> Result<String>;
}
