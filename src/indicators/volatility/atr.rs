//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::AtrIndicator;

/// True range for every bar after the first, over the aligned prefix of the
/// three series.
pub fn true_ranges(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let len = highs.len().min(lows.len()).min(closes.len());
    (1..len)
        .map(|i| math::true_range(highs[i], lows[i], closes[i - 1]))
        .collect()
}

/// ATR series with Wilder's smoothing.
///
/// Seeded with the simple average of the first `period` true ranges (or of all
/// of them when fewer exist, still divided by `period`), then
/// `atr[i] = (atr[i-1] * (period - 1) + tr[i]) / period`.
pub fn atr_series(highs: &[f64], lows: &[f64], closes: &[f64], period: u32) -> Vec<f64> {
    let period = period as usize;
    let tr = true_ranges(highs, lows, closes);
    if period == 0 || tr.is_empty() {
        return Vec::new();
    }

    let seed_len = period.min(tr.len());
    let mut atr = vec![tr[..seed_len].iter().sum::<f64>() / period as f64];

    for &value in tr.iter().skip(period) {
        let previous = atr[atr.len() - 1];
        atr.push(math::wilder_step(previous, value, period));
    }

    atr
}

/// Calculate ATR (Average True Range)
///
/// ATR measures market volatility by averaging true range over a period
pub fn calculate_atr(highs: &[f64], lows: &[f64], closes: &[f64], period: u32) -> Option<AtrIndicator> {
    let value = *atr_series(highs, lows, closes, period).last()?;

    Some(AtrIndicator { value, period })
}
