//! Alert configuration and messaging credentials.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from validating an [`AlertConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("coin_id must not be empty")]
    EmptyCoinId,

    #[error("{field} must be a finite number >= 0, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },
}

/// Thresholds for the monitored coin. Zero disables a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Price API coin identifier (e.g. "bitcoin", "ethereum")
    pub coin_id: CompactString,
    /// Alert when price >= this value (USD)
    pub target_price: f64,
    /// Alert when |24h change| >= this value (percent)
    pub percentage_change: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            coin_id: CompactString::new("bitcoin"),
            target_price: 0.0,
            percentage_change: 0.0,
        }
    }
}

impl AlertConfig {
    /// Create a config for a coin with both rules disabled.
    pub fn new(coin_id: &str) -> Self {
        Self {
            coin_id: CompactString::new(coin_id),
            ..Default::default()
        }
    }

    pub fn with_target_price(mut self, target_price: f64) -> Self {
        self.target_price = target_price;
        self
    }

    pub fn with_percentage_change(mut self, percentage_change: f64) -> Self {
        self.percentage_change = percentage_change;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coin_id.trim().is_empty() {
            return Err(ConfigError::EmptyCoinId);
        }
        for (field, value) in [
            ("target_price", self.target_price),
            ("percentage_change", self.percentage_change),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn target_enabled(&self) -> bool {
        self.target_price > 0.0
    }

    #[inline]
    pub fn percentage_enabled(&self) -> bool {
        self.percentage_change > 0.0
    }

    /// Upper-cased coin id for display, e.g. "BITCOIN".
    pub fn display_name(&self) -> String {
        self.coin_id.as_str().to_uppercase()
    }
}

/// Telegram bot credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bot_token: String,
    pub chat_id: String,
}

impl Credentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
