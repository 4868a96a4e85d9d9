//! VWAP (Volume Weighted Average Price) indicator

use crate::common::math;
use crate::models::indicators::{Candle, VwapIndicator};

/// Calculate VWAP over the whole candle window
///
/// Only candles whose high, low, close and volume all parsed contribute.
/// Returns `None` when nothing contributed or the total volume is zero.
pub fn calculate_vwap(candles: &[Candle]) -> Option<VwapIndicator> {
    let mut price_volume = 0.0;
    let mut volume_sum = 0.0;
    let mut samples = 0;

    for candle in candles {
        let (Some(high), Some(low), Some(close), Some(volume)) =
            (candle.high, candle.low, candle.close, candle.volume)
        else {
            continue;
        };

        price_volume += math::typical_price(high, low, close) * volume;
        volume_sum += volume;
        samples += 1;
    }

    if samples == 0 || volume_sum == 0.0 {
        return None;
    }

    let value = price_volume / volume_sum;
    value.is_finite().then_some(VwapIndicator { value, samples })
}
