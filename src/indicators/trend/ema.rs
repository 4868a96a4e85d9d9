//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::EmaIndicator;

/// Calculate EMA for a specific period over closing prices (oldest first)
pub fn calculate_ema(closes: &[f64], period: u32) -> Option<EmaIndicator> {
    if period == 0 || closes.len() < period as usize {
        return None;
    }

    let ema_value = math::ema(closes, period as usize)?;

    Some(EmaIndicator {
        value: ema_value,
        period,
    })
}
