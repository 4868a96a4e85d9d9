//! SuperTrend indicator

use crate::indicators::volatility::atr;
use crate::models::indicators::SuperTrendIndicator;
use crate::models::TrendFlag;

/// Calculate SuperTrend indicator
///
/// Bands are built around the latest bar's high/low midpoint using the latest
/// ATR. The trend is up while the latest close sits above the lower band, and
/// the reported value is the band on the trend's side (lower band when up,
/// upper band when down).
pub fn calculate_supertrend(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: u32,
    multiplier: f64,
) -> Option<SuperTrendIndicator> {
    let period_len = period as usize;
    if highs.len() < period_len || lows.len() < period_len || closes.len() < period_len {
        return None;
    }

    let atr_value = atr::calculate_atr(highs, lows, closes, period)?.value;

    let last = highs.len().min(lows.len()).min(closes.len()) - 1;
    let hl2 = (highs[last] + lows[last]) / 2.0;
    let upper_band = hl2 + multiplier * atr_value;
    let lower_band = hl2 - multiplier * atr_value;

    let trend = if closes[last] > lower_band {
        TrendFlag::Up
    } else {
        TrendFlag::Down
    };

    let value = match trend {
        TrendFlag::Up => lower_band,
        TrendFlag::Down => upper_band,
    };

    if !value.is_finite() {
        return None;
    }

    Some(SuperTrendIndicator {
        value,
        trend,
        upper_band,
        lower_band,
        period,
        multiplier,
    })
}

/// Calculate SuperTrend with default parameters (10, 3)
pub fn calculate_supertrend_default(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
) -> Option<SuperTrendIndicator> {
    calculate_supertrend(highs, lows, closes, 10, 3.0)
}
