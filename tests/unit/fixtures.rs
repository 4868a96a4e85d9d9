//! Snapshot and candle builders shared by the unit tests

#![allow(dead_code)]

use std::sync::Arc;

use trendfunnel::models::{AssetSnapshot, Candle, Timeframe, TimeframeSnapshot, TrendFlag};

/// `count` bars rising by `step` per bar from `base`.
pub fn rising_candles(count: usize, base: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = base + i as f64 * step;
            Candle::new(close - step / 2.0, close + 0.3, close - 0.2, close, 1000.0 + i as f64)
        })
        .collect()
}

pub fn flat_candles(count: usize, close: f64) -> Vec<Candle> {
    (0..count)
        .map(|_| Candle::new(close, close + 1.0, close - 1.0, close, 500.0))
        .collect()
}

pub fn unavailable(timeframe: Timeframe) -> TimeframeSnapshot {
    TimeframeSnapshot::unavailable(timeframe)
}

/// Snapshot with only the averages set.
pub fn emas(timeframe: Timeframe, ema9: f64, ema20: f64, ema100: f64) -> TimeframeSnapshot {
    TimeframeSnapshot {
        ema9: Some(ema9),
        ema20: Some(ema20),
        ema100: Some(ema100),
        ..TimeframeSnapshot::unavailable(timeframe)
    }
}

pub fn asset(
    symbol: &str,
    price: f64,
    tf3: TimeframeSnapshot,
    tf15: TimeframeSnapshot,
    tf60: TimeframeSnapshot,
    tf240: TimeframeSnapshot,
) -> AssetSnapshot {
    AssetSnapshot {
        symbol: symbol.to_string(),
        price,
        tf3,
        tf15,
        tf60,
        tf240,
    }
}

/// Price 105, bullish on 60m and 240m, active, with a fresh 15m crossover.
pub fn bullish_scenario(symbol: &str) -> AssetSnapshot {
    asset(
        symbol,
        105.0,
        unavailable(Timeframe::M3),
        TimeframeSnapshot {
            macd_histogram: Some(0.0),
            ..emas(Timeframe::M15, 100.01, 100.0, 103.0)
        },
        TimeframeSnapshot {
            macd_histogram: Some(0.0),
            vwap: Some(101.0),
            trend: TrendFlag::Up,
            ..emas(Timeframe::M60, 103.0, 102.0, 100.0)
        },
        TimeframeSnapshot {
            supertrend: Some(97.0),
            trend: TrendFlag::Up,
            ..emas(Timeframe::M240, 99.5, 99.0, 98.0)
        },
    )
}

/// Mirror of [`bullish_scenario`] around price 95.
pub fn bearish_scenario(symbol: &str) -> AssetSnapshot {
    asset(
        symbol,
        95.0,
        unavailable(Timeframe::M3),
        TimeframeSnapshot {
            macd_histogram: Some(0.0),
            ..emas(Timeframe::M15, 99.99, 100.0, 97.0)
        },
        TimeframeSnapshot {
            macd_histogram: Some(0.0),
            vwap: Some(99.0),
            supertrend: Some(101.0),
            trend: TrendFlag::Down,
            ..emas(Timeframe::M60, 97.0, 98.0, 100.0)
        },
        TimeframeSnapshot {
            supertrend: Some(103.0),
            trend: TrendFlag::Down,
            ..emas(Timeframe::M240, 100.5, 101.0, 102.0)
        },
    )
}

pub fn shared(assets: Vec<AssetSnapshot>) -> Vec<Arc<AssetSnapshot>> {
    assets.into_iter().map(Arc::new).collect()
}
