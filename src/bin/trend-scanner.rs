//! Trend Scanner
//!
//! Watches recently listed Bybit USDT perpetuals and reports assets whose
//! trend lines up across the 3m, 15m, 1h and 4h timeframes.

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use trendfunnel::config::Config;
use trendfunnel::core::runtime::supervise;
use trendfunnel::jobs::JobContext;
use trendfunnel::logging;
use trendfunnel::notifications::{LogNotifier, NotificationSink, TelegramNotifier};
use trendfunnel::services::bybit::{BybitMarketDataProvider, BybitRestClient};
use trendfunnel::services::{AssetCollector, MarketDataProvider, RequestPacer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env();
    info!("Starting Trend Scanner");
    info!(environment = %config.environment, "Environment");
    info!(base_url = %config.bybit_base_url, "Bybit REST endpoint");

    let pacer = Arc::new(RequestPacer::new(config.collector.request_delay()));
    let client = BybitRestClient::new(
        config.bybit_base_url.clone(),
        config.request_timeout(),
        config.retry.clone(),
    )?
    .with_pacer(pacer);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(BybitMarketDataProvider::new(
        client,
        config.collector.listing_max_age_days,
    ));
    let collector = Arc::new(AssetCollector::new(provider, config.collector.clone()));

    let notifier: Arc<dyn NotificationSink> = if config.telegram.is_enabled() {
        info!("Telegram notifications enabled");
        Arc::new(TelegramNotifier::new(
            &config.telegram,
            config.request_timeout(),
            config.retry.clone(),
        )?)
    } else {
        info!("Telegram not configured, notifications go to the log only");
        Arc::new(LogNotifier)
    };

    let ctx = Arc::new(JobContext::new(collector, notifier, config));
    supervise(ctx).await?;

    info!("Trend Scanner stopped");
    Ok(())
}
