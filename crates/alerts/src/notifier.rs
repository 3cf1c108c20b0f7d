//! Notification seam.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Telegram request failed: {0}")]
    Network(String),
    #[error("Telegram API returned HTTP {status}: {description}")]
    HttpStatus { status: u16, description: String },
    #[error("Telegram request timed out")]
    Timeout,
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL embeds the bot token
        let err = err.without_url();
        if err.is_timeout() {
            NotifyError::Timeout
        } else if err.is_builder() {
            NotifyError::Client(err.to_string())
        } else {
            NotifyError::Network(err.to_string())
        }
    }
}

/// Delivers a formatted alert message.
///
/// `Ok(())` means the message was accepted; only then may the caller
/// treat the alert as sent.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
