use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::error::{ChoreError, Result};
use crate::notifier::ChatTransport;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot credentials and destination chat
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// The token never appears in logs
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramTransport {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_message(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body: TelegramResponse = response.json().await.map_err(|e| {
            ChoreError::Transport(format!("unreadable response (HTTP {}): {}", status, e))
        })?;

        if !status.is_success() || !body.ok {
            return Err(ChoreError::Transport(format!(
                "HTTP {}: {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        info!("Message delivered to chat {}", self.config.chat_id);
        Ok(())
    }
}
