//! Global trend classifier over the 60m and 240m timeframes.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::indicators::parser::or_zero;
use crate::models::{AssetSnapshot, TimeframeSnapshot, TrendFlag};
use crate::signals::conditions::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendBias {
    Bullish,
    Bearish,
    Neutral,
}

/// Disjoint partition of one cycle's assets, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalTrendResult {
    pub bullish: Vec<Arc<AssetSnapshot>>,
    pub bearish: Vec<Arc<AssetSnapshot>>,
    pub neutral: Vec<Arc<AssetSnapshot>>,
}

impl GlobalTrendResult {
    pub fn len(&self) -> usize {
        self.bullish.len() + self.bearish.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Price beyond EMA100, EMA20 and the Supertrend value, with the trend flag
/// agreeing. EMA20 and Supertrend read as zero when unavailable.
fn trending_on(price: f64, tf: &TimeframeSnapshot, side: Side) -> bool {
    let flag = match side {
        Side::Bullish => TrendFlag::Up,
        Side::Bearish => TrendFlag::Down,
    };

    side.beyond(price, or_zero(tf.ema100))
        && side.beyond(price, or_zero(tf.ema20))
        && side.beyond(price, or_zero(tf.supertrend))
        && tf.trend == flag
}

pub fn classify_global_trend(asset: &AssetSnapshot) -> TrendBias {
    if asset.tf60.ema100.is_none() || asset.tf240.ema100.is_none() {
        return TrendBias::Neutral;
    }

    let price = asset.price;
    let bullish_60 = trending_on(price, &asset.tf60, Side::Bullish);
    let bullish_240 = trending_on(price, &asset.tf240, Side::Bullish);
    let bearish_60 = trending_on(price, &asset.tf60, Side::Bearish);
    let bearish_240 = trending_on(price, &asset.tf240, Side::Bearish);

    // 60m leads unless 240m points the other way; bullish is checked first
    if (bullish_60 && bullish_240) || (bullish_60 && !bearish_240) {
        TrendBias::Bullish
    } else if (bearish_60 && bearish_240) || (bearish_60 && !bullish_240) {
        TrendBias::Bearish
    } else {
        TrendBias::Neutral
    }
}

pub fn analyze_global_trend(assets: &[Arc<AssetSnapshot>]) -> GlobalTrendResult {
    let mut result = GlobalTrendResult::default();

    for asset in assets {
        let bucket = match classify_global_trend(asset) {
            TrendBias::Bullish => &mut result.bullish,
            TrendBias::Bearish => &mut result.bearish,
            TrendBias::Neutral => &mut result.neutral,
        };
        bucket.push(Arc::clone(asset));
    }

    info!(
        bullish = result.bullish.len(),
        bearish = result.bearish.len(),
        neutral = result.neutral.len(),
        "Global trend: {} bullish, {} bearish, {} neutral",
        result.bullish.len(),
        result.bearish.len(),
        result.neutral.len()
    );

    result
}
