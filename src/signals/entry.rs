//! Entry-signal detector on the 15m and 3m timeframes.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::indicators::parser::or_zero;
use crate::models::{AssetSnapshot, SignalStrength, Timeframe, TradeSignal};
use crate::signals::active_filter::ActiveTokens;
use crate::signals::conditions::{ema_crossover_imminent, macd_confirms, Side};

/// Checked in this order for every asset.
pub const ENTRY_TIMEFRAMES: [Timeframe; 2] = [Timeframe::M15, Timeframe::M3];

/// Price beyond EMA100, MACD confirming and EMA9/EMA20 freshly crossed on
/// `timeframe`.
pub fn entry_confirmed(asset: &AssetSnapshot, timeframe: Timeframe, side: Side) -> bool {
    let tf = asset.timeframe(timeframe);

    side.beyond(asset.price, or_zero(tf.ema100))
        && macd_confirms(tf.macd_histogram, side)
        && ema_crossover_imminent(tf.ema9, tf.ema20, side)
}

fn signals_for(asset: &AssetSnapshot, side: Side, timestamp: DateTime<Utc>) -> Vec<TradeSignal> {
    ENTRY_TIMEFRAMES
        .into_iter()
        .filter(|&timeframe| entry_confirmed(asset, timeframe, side))
        .map(|timeframe| TradeSignal {
            symbol: asset.symbol.clone(),
            direction: side.direction(),
            timeframe,
            price: asset.price,
            strength: SignalStrength::for_timeframe(timeframe),
            timestamp,
        })
        .collect()
}

/// All bullish-derived signals (asset order, 15m before 3m), then all
/// bearish-derived ones. Every signal carries the same detection timestamp.
pub fn find_trades(active: &ActiveTokens, timestamp: DateTime<Utc>) -> Vec<TradeSignal> {
    let bullish = active
        .active_bullish
        .iter()
        .flat_map(|asset| signals_for(asset, Side::Bullish, timestamp));
    let bearish = active
        .active_bearish
        .iter()
        .flat_map(|asset| signals_for(asset, Side::Bearish, timestamp));

    bullish.chain(bearish).collect()
}

pub fn log_trade_signals(signals: &[TradeSignal]) {
    if signals.is_empty() {
        info!("No trade signals found");
        return;
    }

    for signal in signals {
        info!(
            symbol = %signal.symbol,
            direction = %signal.direction,
            timeframe = %signal.timeframe,
            strength = %signal.strength,
            price = signal.price,
            "Trade signal: {} {} {} at {:.4}",
            signal.symbol,
            signal.direction,
            signal.timeframe,
            signal.price
        );
    }
}
