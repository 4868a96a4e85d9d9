//! Job handlers, one per timer
//!
//! Handlers never fail the timer that drives them: exchange and sink errors
//! are logged and the tick ends with whatever state is already published.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::jobs::context::JobContext;
use crate::jobs::types::JobKind;
use crate::models::TradeSignal;
use crate::notifications::{NotifyError, SummaryReport};
use crate::signals::{log_trade_signals, CycleContext};

pub const SIGNALS_TITLE: &str = "Trade signals";
pub const UPDATE_TITLE: &str = "Regular update";

/// Reload the symbol universe. A failed fetch publishes an empty universe.
pub async fn refresh_universe(ctx: &JobContext) -> usize {
    info!("Refreshing token universe");

    let mut symbols = match ctx.collector.provider().list_symbols().await {
        Ok(symbols) => symbols,
        Err(e) => {
            warn!(error = %e, "Universe fetch failed, continuing with an empty universe");
            Vec::new()
        }
    };

    let max_assets = ctx.collector.config().max_assets;
    let listed = symbols.len();
    symbols.truncate(max_assets);

    info!(
        listed = listed,
        kept = symbols.len(),
        max_assets = max_assets,
        "Universe refreshed: {} symbols",
        symbols.len()
    );

    let count = symbols.len();
    ctx.state.write().await.symbols = symbols;
    count
}

/// Collect fresh snapshots and publish a new cycle for the current universe.
pub async fn refresh_indicators(ctx: &JobContext) -> Arc<CycleContext> {
    let symbols = ctx.symbols().await;
    info!(symbols = symbols.len(), "Refreshing indicators");

    let assets = ctx.collector.collect_all(&symbols).await;
    let cycle = Arc::new(CycleContext::evaluate(assets, Utc::now()));

    info!(
        assets = cycle.asset_count(),
        active = cycle.active.total(),
        "Indicators refreshed, {} active assets",
        cycle.active.total()
    );

    ctx.state.write().await.cycle = Some(cycle.clone());
    cycle
}

/// Run entry detection on the latest cycle and push any signals to the sink.
pub async fn check_signals(ctx: &JobContext) -> Vec<TradeSignal> {
    let Some(cycle) = ctx.latest_cycle().await else {
        debug!("No cycle evaluated yet, skipping signal check");
        return Vec::new();
    };

    if cycle.active.is_empty() {
        debug!("No active assets, skipping signal check");
        return Vec::new();
    }

    debug!(active = cycle.active.total(), "Checking entry signals");
    let now = Utc::now();
    let signals = cycle.detect_signals(now);
    log_trade_signals(&signals);

    if !signals.is_empty() {
        let report = SummaryReport::from_cycle(SIGNALS_TITLE, &cycle, signals.clone(), now);
        deliver_report(ctx, &report).await;
    }

    signals
}

/// Periodic summary; sent only while something is actively trending, and
/// without an alert since it carries no signals.
/// Returns whether a message was handed to the sink.
pub async fn send_regular_update(ctx: &JobContext) -> bool {
    let Some(cycle) = ctx.latest_cycle().await else {
        return false;
    };

    if cycle.active.is_empty() {
        debug!("No active assets, skipping regular update");
        return false;
    }

    let report = SummaryReport::from_cycle(UPDATE_TITLE, &cycle, Vec::new(), Utc::now());
    deliver_report(ctx, &report).await
}

pub async fn log_stats(ctx: &JobContext) {
    let state = ctx.snapshot().await;
    let (assets, bullish, bearish) = state.cycle.as_ref().map_or((0, 0, 0), |c| {
        (
            c.asset_count(),
            c.active.active_bullish.len(),
            c.active.active_bearish.len(),
        )
    });

    info!(
        symbols = state.symbols.len(),
        assets = assets,
        active_bullish = bullish,
        active_bearish = bearish,
        "Stats: {} symbols, {} with data, {} active",
        state.symbols.len(),
        assets,
        bullish + bearish
    );
}

pub(crate) async fn deliver(ctx: &JobContext, message: &str) -> bool {
    delivered(ctx.notifier.send(message).await)
}

/// Reports without signals go out silently.
async fn deliver_report(ctx: &JobContext, report: &SummaryReport) -> bool {
    let message = report.render();
    let result = if report.signals.is_empty() {
        ctx.notifier.send_silent(&message).await
    } else {
        ctx.notifier.send(&message).await
    };
    delivered(result)
}

fn delivered(result: Result<(), NotifyError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Notification failed");
            false
        }
    }
}

/// Dispatch one tick of `kind`.
pub async fn run(kind: JobKind, ctx: &JobContext) {
    match kind {
        JobKind::RefreshUniverse => {
            refresh_universe(ctx).await;
        }
        JobKind::RefreshIndicators => {
            refresh_indicators(ctx).await;
        }
        JobKind::CheckSignals => {
            check_signals(ctx).await;
        }
        JobKind::Notify => {
            send_regular_update(ctx).await;
        }
        JobKind::Stats => log_stats(ctx).await,
    }
}
