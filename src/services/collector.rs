//! Per-cycle asset collection: prices and candles in, asset snapshots out.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::config::CollectorConfig;
use crate::indicators::engine::{IndicatorEngine, PriceSeries, MIN_CANDLES};
use crate::indicators::parser::parse_numeric_or_zero;
use crate::models::{AssetSnapshot, Timeframe};
use crate::services::market_data::{MarketDataError, MarketDataProvider, NO_PRICE};

pub struct AssetCollector {
    provider: Arc<dyn MarketDataProvider>,
    config: CollectorConfig,
}

impl AssetCollector {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: CollectorConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &Arc<dyn MarketDataProvider> {
        &self.provider
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Snapshot one asset. `Ok(None)` when the exchange has no price or any
    /// timeframe is shorter than [`MIN_CANDLES`].
    pub async fn collect_asset(&self, symbol: &str) -> Result<Option<AssetSnapshot>, MarketDataError> {
        let price = self.provider.get_latest_price(symbol).await?;
        if price == NO_PRICE {
            debug!(symbol = %symbol, "No price, skipping");
            return Ok(None);
        }

        let mut series = BTreeMap::new();
        for timeframe in Timeframe::ALL {
            let candles = self
                .provider
                .get_candles(symbol, timeframe, self.config.kline_limit)
                .await?;

            if PriceSeries::prepare(&candles).is_err() {
                debug!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    candles = candles.len(),
                    min = MIN_CANDLES,
                    "Not enough history, skipping"
                );
                return Ok(None);
            }
            series.insert(timeframe, candles);
        }

        let price = parse_numeric_or_zero(&price);
        Ok(Some(IndicatorEngine::asset_snapshot(symbol, price, &series)))
    }

    /// Snapshot every symbol, `batch_size` at a time. Failures only drop the
    /// asset they belong to; output keeps input order.
    pub async fn collect_all(&self, symbols: &[String]) -> Vec<Arc<AssetSnapshot>> {
        let batch_size = self.config.batch_size.max(1);
        let batch_count = symbols.len().div_ceil(batch_size);
        let mut assets = Vec::with_capacity(symbols.len());

        info!(symbols = symbols.len(), batches = batch_count, "Collecting asset data");

        for (index, batch) in symbols.chunks(batch_size).enumerate() {
            debug!(batch = index + 1, of = batch_count, symbols = ?batch, "Collecting batch");

            let results = join_all(batch.iter().map(|symbol| self.collect_logged(symbol))).await;
            assets.extend(results.into_iter().flatten().map(Arc::new));

            if index + 1 < batch_count {
                tokio::time::sleep(self.config.batch_delay()).await;
            }
        }

        info!(
            collected = assets.len(),
            requested = symbols.len(),
            "Collected data for {}/{} assets",
            assets.len(),
            symbols.len()
        );

        assets
    }

    async fn collect_logged(&self, symbol: &str) -> Option<AssetSnapshot> {
        match self.collect_asset(symbol).await {
            Ok(Some(asset)) => {
                debug!(symbol = %symbol, "Asset collected");
                Some(asset)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Asset collection failed");
                None
            }
        }
    }
}
