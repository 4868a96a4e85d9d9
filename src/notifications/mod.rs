//! Notification sink: where summaries and signals are delivered.

pub mod report;
pub mod telegram;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

pub use report::{started_message, stopped_message, SummaryReport};
pub use telegram::TelegramNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
}

impl NotifyError {
    pub fn is_transient(&self) -> bool {
        match self {
            NotifyError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            NotifyError::Api(_) => false,
        }
    }
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifyError>;

    /// Deliver without an alert. Sinks with no such notion send normally.
    async fn send_silent(&self, message: &str) -> Result<(), NotifyError> {
        self.send(message).await
    }

    fn is_enabled(&self) -> bool;
}

/// Sink used when no chat transport is configured; messages only reach the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let preview: String = message.chars().take(50).collect();
        info!(preview = %preview, "Notifications disabled, message not sent");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
