//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::MacdIndicator;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Every EMA is seeded with the simple average of its first `period` inputs, so
/// the MACD line starts once the slow EMA exists and the histogram once the
/// signal EMA has `signal_period` MACD points behind it.
pub fn calculate_macd(
    closes: &[f64],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if fast_period == 0 || fast_period >= slow_period || signal_period == 0 {
        return None;
    }

    let fast = math::ema_series(closes, fast_period as usize);
    let slow = math::ema_series(closes, slow_period as usize);
    if slow.is_empty() {
        return None;
    }

    // fast[k] and slow[k] refer to input indices fast_period-1+k and slow_period-1+k
    let offset = (slow_period - fast_period) as usize;
    let macd_values: Vec<f64> = slow
        .iter()
        .enumerate()
        .map(|(k, slow_value)| fast[k + offset] - slow_value)
        .collect();

    let signal_line = math::ema(&macd_values, signal_period as usize)?;
    let macd_line = *macd_values.last()?;

    Some(MacdIndicator {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
        period: Some((fast_period, slow_period, signal_period)),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> Option<MacdIndicator> {
    calculate_macd(closes, 12, 26, 9)
}
