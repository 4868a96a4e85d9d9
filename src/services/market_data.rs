//! Market data provider interface consumed by the asset collector.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Candle, Timeframe};

/// Price returned when the exchange has no data for a symbol.
pub const NO_PRICE: &str = "0";

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

impl MarketDataError {
    /// Connection resets, timeouts and aborted sends are worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Tradable symbols in the current universe.
    async fn list_symbols(&self) -> Result<Vec<String>, MarketDataError>;

    /// Latest price as the exchange encodes it; [`NO_PRICE`] means no data.
    async fn get_latest_price(&self, symbol: &str) -> Result<String, MarketDataError>;

    /// Candles for one timeframe, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
