//! Active-trend filter: which biased assets are trending right now.

use std::sync::Arc;

use tracing::{debug, info};

use crate::indicators::parser::or_zero;
use crate::models::{AssetSnapshot, TrendFlag};
use crate::signals::conditions::{macd_confirms, Side};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveTokens {
    pub active_bullish: Vec<Arc<AssetSnapshot>>,
    pub active_bearish: Vec<Arc<AssetSnapshot>>,
}

impl ActiveTokens {
    pub fn total(&self) -> usize {
        self.active_bullish.len() + self.active_bearish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// All five required conditions for `side`. Assets missing the 60m EMA100,
/// EMA20 or VWAP are never active.
pub fn is_actively_trending(asset: &AssetSnapshot, side: Side) -> bool {
    let tf60 = &asset.tf60;
    let (Some(ema100), Some(ema20), Some(vwap)) = (tf60.ema100, tf60.ema20, tf60.vwap) else {
        return false;
    };

    let price = asset.price;
    let flag = match side {
        Side::Bullish => TrendFlag::Up,
        Side::Bearish => TrendFlag::Down,
    };

    let above_averages = side.beyond(price, ema100) && side.beyond(price, ema20);
    let momentum = macd_confirms(tf60.macd_histogram, side);
    let supertrend = tf60.trend == flag;
    let beyond_vwap = side.beyond(price, vwap);
    let short_term = side.beyond(price, or_zero(asset.tf15.ema100));

    above_averages && momentum && supertrend && beyond_vwap && short_term
}

/// Informational confirmations; they never change inclusion.
fn optional_confirmations(asset: &AssetSnapshot, side: Side) -> usize {
    let tf60 = &asset.tf60;
    let ema9 = or_zero(tf60.ema9);
    let ema20 = or_zero(tf60.ema20);
    let ema100 = or_zero(tf60.ema100);

    [
        side.beyond(asset.price, ema9),
        side.beyond(ema20, ema100),
        side.beyond(ema9, ema20),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count()
}

fn filter_side(candidates: &[Arc<AssetSnapshot>], side: Side) -> Vec<Arc<AssetSnapshot>> {
    candidates
        .iter()
        .filter(|asset| is_actively_trending(asset, side))
        .inspect(|asset| {
            debug!(
                symbol = %asset.symbol,
                side = ?side,
                optional = optional_confirmations(asset, side),
                "Active filter: {} passed",
                asset.symbol
            );
        })
        .cloned()
        .collect()
}

pub fn filter_active_tokens(
    bullish: &[Arc<AssetSnapshot>],
    bearish: &[Arc<AssetSnapshot>],
) -> ActiveTokens {
    let result = ActiveTokens {
        active_bullish: filter_side(bullish, Side::Bullish),
        active_bearish: filter_side(bearish, Side::Bearish),
    };

    info!(
        active_bullish = result.active_bullish.len(),
        active_bearish = result.active_bearish.len(),
        "Active tokens: {} bullish, {} bearish",
        result.active_bullish.len(),
        result.active_bearish.len()
    );

    result
}
