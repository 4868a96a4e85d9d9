//! Cycle-scoped pipeline context.
//!
//! One `CycleContext` is built per indicator refresh from freshly collected
//! snapshots. Stages run strictly in order and each one only reads the output
//! of the stage before it. A context is never updated in place; the next
//! refresh replaces it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{AssetSnapshot, TradeSignal};
use crate::signals::active_filter::{filter_active_tokens, ActiveTokens};
use crate::signals::entry::find_trades;
use crate::signals::global_trend::{analyze_global_trend, GlobalTrendResult};

#[derive(Debug, Clone)]
pub struct CycleContext {
    pub assets: Vec<Arc<AssetSnapshot>>,
    pub global_trend: GlobalTrendResult,
    pub active: ActiveTokens,
    pub evaluated_at: DateTime<Utc>,
}

impl CycleContext {
    /// Run the global-trend and active-trend stages over `assets`.
    pub fn evaluate(assets: Vec<Arc<AssetSnapshot>>, evaluated_at: DateTime<Utc>) -> Self {
        let global_trend = analyze_global_trend(&assets);
        let active = filter_active_tokens(&global_trend.bullish, &global_trend.bearish);

        Self {
            assets,
            global_trend,
            active,
            evaluated_at,
        }
    }

    /// Run the entry-signal stage against this cycle's active sets.
    pub fn detect_signals(&self, detected_at: DateTime<Utc>) -> Vec<TradeSignal> {
        find_trades(&self.active, detected_at)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}
