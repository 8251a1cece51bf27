/// OpenAI API client backing the intake assistant
use async_trait::async_trait;
use lexintake_core::LanguageModel;
use lexintake_domain::{ChatMessage, IntakeError, OpenAiConfig, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::Method;
use tracing::{debug, info};

use super::types::{
    ChatCompletion, ChatCompletionRequest, ChatCompletionResponse, OpenAIError, WireMessage,
};
use crate::http::HttpClient;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4-turbo";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// OpenAI Chat Completions client
pub struct OpenAIClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key (required)
    /// * `http_client` - HTTP client with retry logic
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Build a client for the configured key and model.
    pub fn from_config(config: &OpenAiConfig, http_client: HttpClient) -> Self {
        Self::new(config.api_key.clone(), http_client).with_model(config.model.clone())
    }

    /// Create a new client with custom model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create a new client with custom API URL (for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Ask the model for the next assistant turn of `history`
    ///
    /// # Errors
    /// Returns `OpenAIError` for network failures, API errors, or responses
    /// without a message.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        temperature: f32,
    ) -> std::result::Result<ChatCompletion, OpenAIError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: history.iter().map(WireMessage::from).collect(),
            temperature,
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload);

        // Execute with retry (handled by HttpClient)
        let response = self.http_client.send(request_builder).await.map_err(|err| match err {
            IntakeError::Network(msg) | IntakeError::Internal(msg) => OpenAIError::Network(msg),
            other => OpenAIError::Network(format!("HTTP error: {}", other)),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "Received OpenAI API response");

        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenAIError::InvalidSchema(format!("Failed to parse response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                OpenAIError::InvalidSchema("Response contained no message".to_string())
            })?;
        let tokens_used = chat_response.usage.map_or(0, |usage| usage.total_tokens);

        info!(tokens = tokens_used, messages = history.len(), "OpenAI completion received");
        Ok(ChatCompletion { content, tokens_used })
    }
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    async fn complete(&self, history: &[ChatMessage], temperature: f32) -> Result<String> {
        let completion = self.chat(history, temperature).await?;
        Ok(completion.content)
    }
}

/// Handle HTTP error status codes
async fn handle_error_status(status: u16, response: reqwest::Response) -> OpenAIError {
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 | 403 => OpenAIError::Authentication(format!("Invalid API key ({})", status)),
        429 => OpenAIError::RateLimit(retry_after),
        _ => OpenAIError::Api { status, message },
    }
}
