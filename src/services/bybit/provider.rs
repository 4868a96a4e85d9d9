//! Bybit market data provider implementation

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::client::BybitRestClient;
use super::messages::{candle_from_row, Instrument};
use crate::indicators::parser::parse_i64;
use crate::models::{Candle, Timeframe};
use crate::services::market_data::{MarketDataError, MarketDataProvider};

pub struct BybitMarketDataProvider {
    client: BybitRestClient,
    listing_max_age: Duration,
}

impl BybitMarketDataProvider {
    pub fn new(client: BybitRestClient, listing_max_age_days: i64) -> Self {
        Self {
            client,
            listing_max_age: Duration::days(listing_max_age_days),
        }
    }
}

/// `^[A-Z]+USDT$`
pub fn is_usdt_symbol(symbol: &str) -> bool {
    symbol
        .strip_suffix("USDT")
        .is_some_and(|base| !base.is_empty() && base.bytes().all(|b| b.is_ascii_uppercase()))
}

/// Trading USDT contracts launched no longer than `max_age` before `now`.
/// An unparseable launch time excludes the instrument.
pub fn filter_universe(instruments: &[Instrument], now: DateTime<Utc>, max_age: Duration) -> Vec<String> {
    let now_ms = now.timestamp_millis();
    let max_age_ms = max_age.num_milliseconds();

    instruments
        .iter()
        .filter(|i| i.status == "Trading")
        .filter(|i| {
            parse_i64(&i.launch_time)
                .map(|launch| now_ms - launch <= max_age_ms)
                .unwrap_or(false)
        })
        .filter(|i| is_usdt_symbol(&i.symbol))
        .map(|i| i.symbol.clone())
        .collect()
}

#[async_trait]
impl MarketDataProvider for BybitMarketDataProvider {
    async fn list_symbols(&self) -> Result<Vec<String>, MarketDataError> {
        let instruments = self.client.instruments().await?;
        let symbols = filter_universe(&instruments, Utc::now(), self.listing_max_age);
        debug!(
            instruments = instruments.len(),
            symbols = symbols.len(),
            "Bybit universe filtered"
        );
        Ok(symbols)
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<String, MarketDataError> {
        self.client.last_price(symbol).await
    }

    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let rows = self.client.klines(symbol, timeframe.interval(), limit).await?;

        // the exchange lists newest first
        Ok(rows.iter().rev().map(|row| candle_from_row(row)).collect())
    }
}
