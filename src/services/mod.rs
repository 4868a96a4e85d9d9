//! External data source: exchange client, pacing and asset collection.

pub mod bybit;
pub mod collector;
pub mod market_data;
pub mod pacing;

pub use collector::AssetCollector;
pub use market_data::{MarketDataError, MarketDataProvider, NO_PRICE};
pub use pacing::RequestPacer;
