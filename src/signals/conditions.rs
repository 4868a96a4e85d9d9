//! Thresholds and predicates shared by the trend funnel stages.

use crate::indicators::parser::or_zero;
use crate::models::SignalDirection;

/// Histogram above this counts as "near-zero-or-positive".
pub const MACD_BULLISH_FLOOR: f64 = -0.000005;
/// Histogram below this counts as "near-zero-or-negative".
pub const MACD_BEARISH_CEILING: f64 = 0.000005;
/// Largest EMA9/EMA20 gap, in percent of EMA20, still treated as a fresh cross.
pub const CROSSOVER_MAX_GAP_PCT: f64 = 0.05;

/// Direction a stage is checking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bullish,
    Bearish,
}

impl Side {
    pub fn direction(self) -> SignalDirection {
        match self {
            Side::Bullish => SignalDirection::Long,
            Side::Bearish => SignalDirection::Short,
        }
    }

    /// `a` beyond `b` in this side's direction (strict).
    pub fn beyond(self, a: f64, b: f64) -> bool {
        match self {
            Side::Bullish => a > b,
            Side::Bearish => a < b,
        }
    }
}

/// An unavailable histogram never confirms.
pub fn is_bullish_macd(histogram: Option<f64>) -> bool {
    histogram.is_some_and(|h| h > MACD_BULLISH_FLOOR)
}

pub fn is_bearish_macd(histogram: Option<f64>) -> bool {
    histogram.is_some_and(|h| h < MACD_BEARISH_CEILING)
}

pub fn macd_confirms(histogram: Option<f64>, side: Side) -> bool {
    match side {
        Side::Bullish => is_bullish_macd(histogram),
        Side::Bearish => is_bearish_macd(histogram),
    }
}

/// Percentage gap `|ema9 - ema20| / ema20 * 100`.
pub fn ema_gap_pct(ema9: f64, ema20: f64) -> f64 {
    (ema9 - ema20).abs() / ema20 * 100.0
}

/// EMA9 has just crossed EMA20 in `side`'s direction by less than
/// [`CROSSOVER_MAX_GAP_PCT`]. Unavailable readings read as zero and fail.
pub fn ema_crossover_imminent(ema9: Option<f64>, ema20: Option<f64>, side: Side) -> bool {
    let ema9 = or_zero(ema9);
    let ema20 = or_zero(ema20);

    if ema9 == 0.0 || ema20 == 0.0 {
        return false;
    }

    side.beyond(ema9, ema20) && ema_gap_pct(ema9, ema20) < CROSSOVER_MAX_GAP_PCT
}
