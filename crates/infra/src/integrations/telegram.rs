//! Telegram Bot API notifier

use async_trait::async_trait;
use lexintake_core::Notifier;
use lexintake_domain::{IntakeError, NotificationMessage, Result, TelegramConfig};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::http::HttpClient;

/// Posts staff notifications to a Telegram chat through a bot.
pub struct TelegramNotifier {
    http: HttpClient,
    send_url: String,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(http: HttpClient, api_base_url: &str, bot_token: &str) -> Self {
        let send_url =
            format!("{}/bot{}/sendMessage", api_base_url.trim_end_matches('/'), bot_token);
        Self { http, send_url }
    }

    pub fn from_config(config: &TelegramConfig, http: HttpClient) -> Self {
        Self::new(http, &config.api_base_url, &config.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, recipient: &str, message: &NotificationMessage) -> Result<()> {
        let form =
            [("chat_id", recipient), ("text", message.body.as_str()), ("parse_mode", "Markdown")];
        let request = self.http.request(Method::POST, &self.send_url).form(&form);

        let response: SendMessageResponse = self.http.send_json(request).await?;
        if !response.ok {
            return Err(IntakeError::Notification(format!(
                "Telegram rejected message: {}",
                response.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        debug!(chat_id = recipient, "Telegram message delivered");
        Ok(())
    }
}
