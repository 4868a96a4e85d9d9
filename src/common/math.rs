//! Numeric recurrences shared by the indicator calculators.

/// One EMA step with smoothing factor `2 / (period + 1)`.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    (value - previous) * k + previous
}

/// Full EMA series seeded with the simple average of the first `period` values.
///
/// The first element corresponds to input index `period - 1`, so the output has
/// `values.len() - period + 1` entries. Empty when the input is too short.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(seed);

    let mut previous = seed;
    for &value in &values[period..] {
        previous = ema_from_previous(value, previous, period);
        series.push(previous);
    }

    series
}

/// Last value of the EMA series.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}

/// Wilder smoothing step: `(previous * (period - 1) + value) / period`.
pub fn wilder_step(previous: f64, value: f64, period: usize) -> f64 {
    (previous * (period as f64 - 1.0) + value) / period as f64
}

pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Mean typical price `(high + low + close) / 3`.
pub fn typical_price(high: f64, low: f64, close: f64) -> f64 {
    (high + low + close) / 3.0
}
