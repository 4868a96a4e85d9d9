//! Telegram Bot API sink

use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{NotificationSink, NotifyError};
use crate::config::{RetryPolicy, TelegramConfig};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_notification: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    base_url: String,
    bot_token: String,
    chat_id: String,
    http: Client,
    retry: RetryPolicy,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, timeout: Duration, retry: RetryPolicy) -> Result<Self, NotifyError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(config, http, retry))
    }

    pub fn with_client(config: &TelegramConfig, http: Client, retry: RetryPolicy) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            http,
            retry,
        }
    }

    async fn post(&self, message: &str, silent: bool) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let url = url.as_str();

        (|| self.send_once(url, message, silent))
            .retry(self.retry.backoff())
            .when(NotifyError::is_transient)
            .notify(|err, delay| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "Telegram send failed, retrying");
            })
            .await?;

        debug!(silent = silent, "Telegram notification sent");
        Ok(())
    }

    async fn send_once(&self, url: &str, message: &str, silent: bool) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: "Markdown",
            disable_notification: silent.then_some(true),
        };

        let response: SendMessageResponse = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(NotifyError::Api(
                response.description.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(())
    }
}

/// Escape characters that legacy Markdown would treat as formatting.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.post(message, false).await
    }

    async fn send_silent(&self, message: &str) -> Result<(), NotifyError> {
        self.post(message, true).await
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
