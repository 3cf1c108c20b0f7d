//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching a price.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Price request failed: {0}")]
    ConnectionFailed(String),

    #[error("Price API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Price request timed out")]
    Timeout,

    #[error("Failed to parse price response: {0}")]
    ParseError(String),

    #[error("Coin '{0}' not found in price API response")]
    CoinNotFound(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            FeedError::Timeout
        } else if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else if err.is_builder() {
            FeedError::Client(err.to_string())
        } else {
            FeedError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

impl FeedError {
    /// Returns true if this error is likely to clear up on the next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            FeedError::ConnectionFailed(_) | FeedError::Timeout => true,
            // 429 and 5xx are the API's problem, not ours
            FeedError::HttpStatus(code) => *code == 429 || *code >= 500,
            FeedError::ParseError(_) | FeedError::CoinNotFound(_) | FeedError::Client(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FeedError::Timeout.is_transient());
        assert!(FeedError::ConnectionFailed("reset".into()).is_transient());
        assert!(FeedError::HttpStatus(429).is_transient());
        assert!(FeedError::HttpStatus(503).is_transient());
        assert!(!FeedError::HttpStatus(404).is_transient());
        assert!(!FeedError::CoinNotFound("dogecoin2".into()).is_transient());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FeedError::CoinNotFound("foo".into()).to_string(),
            "Coin 'foo' not found in price API response"
        );
        assert_eq!(FeedError::HttpStatus(500).to_string(), "Price API returned HTTP 500");
    }
}
