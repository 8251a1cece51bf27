/// OpenAI integration for the intake assistant
///
/// `OpenAIClient` wraps the Chat Completions API and implements the
/// [`lexintake_core::LanguageModel`] port used for intent classification and
/// conversational replies.
///
/// # Usage
///
/// ```no_run
/// use lexintake_domain::ChatMessage;
/// use lexintake_infra::http::HttpClient;
/// use lexintake_infra::integrations::openai::OpenAIClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http_client = HttpClient::new()?;
/// let api_key = std::env::var("OPENAI_API_KEY")?;
/// let client = OpenAIClient::new(api_key, http_client);
///
/// let history = vec![ChatMessage::user("Olá")];
/// let completion = client.chat(&history, 0.2).await?;
/// println!("{} ({} tokens)", completion.content, completion.tokens_used);
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - **Network errors and 5xx**: retried by `HttpClient` with backoff
/// - **429**: retried by `HttpClient`; surfaces as `RateLimit` once exhausted
/// - **401/403**: `Authentication`, mapped to `IntakeError::Auth` through the port
pub mod client;
pub mod types;

pub use client::OpenAIClient;
pub use types::{ChatCompletion, OpenAIError};
