//! CoinGecko simple-price REST client.
//!
//! `GET /simple/price?ids=<coin>&vs_currencies=usd&include_24hr_change=true`
//! returns `{"<coin>": {"usd": 50000.0, "usd_24h_change": -1.2}}`.

use crate::{FeedError, PriceSource};
use async_trait::async_trait;
use pricealert_core::{PriceReading, QUOTE_CURRENCY};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Per-request timeout for the quote API.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SimplePriceQuote {
    usd: f64,
    #[serde(default)]
    usd_24h_change: Option<f64>,
}

/// Decode a simple-price response body for one coin.
///
/// A missing or null 24h change reads as 0.
pub fn parse_simple_price(coin_id: &str, body: &[u8]) -> Result<PriceReading, FeedError> {
    let quotes: HashMap<String, serde_json::Value> = serde_json::from_slice(body)?;
    quote_for_coin(coin_id, quotes)
}

/// Pick `coin_id` out of the response map. Sibling entries are never decoded.
fn quote_for_coin(
    coin_id: &str,
    mut quotes: HashMap<String, serde_json::Value>,
) -> Result<PriceReading, FeedError> {
    let entry = quotes
        .remove(coin_id)
        .ok_or_else(|| FeedError::CoinNotFound(coin_id.to_string()))?;
    let quote: SimplePriceQuote = serde_json::from_value(entry)?;

    Ok(PriceReading::new(
        quote.usd,
        quote.usd_24h_change.unwrap_or(0.0),
    ))
}

/// CoinGecko price client.
pub struct CoinGeckoClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Client for the public CoinGecko API.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(COINGECKO_API_URL)
    }

    /// Client for a custom base URL (proxy or test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FeedError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Client for a custom base URL with a non-default request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_price(&self, coin_id: &str) -> Result<PriceReading, FeedError> {
        let url = format!("{}/simple/price", self.base_url);
        debug!(coin_id, "Fetching price");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("ids", coin_id),
                ("vs_currencies", QUOTE_CURRENCY),
                ("include_24hr_change", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let quotes: HashMap<String, serde_json::Value> = response.json().await?;
        quote_for_coin(coin_id, quotes)
    }
}
