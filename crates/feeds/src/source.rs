//! Price source abstraction.

use crate::FeedError;
use async_trait::async_trait;
use pricealert_core::PriceReading;

/// Anything that can produce a USD price reading for a coin.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price and 24h change for `coin_id`.
    async fn fetch_price(&self, coin_id: &str) -> Result<PriceReading, FeedError>;
}
