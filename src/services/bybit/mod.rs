//! Bybit linear-perpetual data source

pub mod client;
pub mod messages;
pub mod provider;

pub use client::BybitRestClient;
pub use provider::{filter_universe, is_usdt_symbol, BybitMarketDataProvider};
