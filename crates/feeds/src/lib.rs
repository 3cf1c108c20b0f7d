//! Price feeds for the alert bot.
//!
//! - [`PriceSource`]: the seam the monitor loop polls through
//! - [`CoinGeckoClient`]: REST client for the public simple-price endpoint
//! - [`FeedError`]: fetch failures, all of which skip a cycle rather than abort

pub mod coingecko;
pub mod error;
pub mod source;

pub use coingecko::{parse_simple_price, CoinGeckoClient, COINGECKO_API_URL, REQUEST_TIMEOUT};
pub use error::FeedError;
pub use source::PriceSource;
