//! Indicator engine: candle series in, fixed indicator snapshot out.
//!
//! The engine never fails. Short series, unparseable fields and non-finite
//! results all degrade to "unavailable" readings, with the Supertrend trend
//! flag defaulting to up.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::calculate_macd_default;
use crate::indicators::structure::calculate_supertrend_default;
use crate::indicators::trend::calculate_ema;
use crate::indicators::volume::calculate_vwap;
use crate::models::{AssetSnapshot, Candle, Timeframe, TimeframeSnapshot, TrendFlag};

/// Minimum candles (and parseable closes) per timeframe.
pub const MIN_CANDLES: usize = 100;

/// Readings are published with this many decimal places.
pub const SNAPSHOT_DECIMALS: u32 = 6;

/// Parsed price columns of one candle series.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
}

impl PriceSeries {
    /// Split candles into close and high/low columns, dropping unparsed values.
    ///
    /// Highs and lows are kept pairwise; closes are filtered on their own.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let closes = candles.iter().filter_map(|c| c.close).collect();
        let (highs, lows) = candles
            .iter()
            .filter_map(|c| Some((c.high?, c.low?)))
            .unzip();

        Self { closes, highs, lows }
    }

    /// Gate used before any indicator is computed.
    pub fn prepare(candles: &[Candle]) -> Result<Self, IndicatorError> {
        if candles.len() < MIN_CANDLES {
            return Err(IndicatorError::InsufficientData {
                required: MIN_CANDLES,
                actual: candles.len(),
            });
        }

        let series = Self::from_candles(candles);
        if series.closes.len() < MIN_CANDLES {
            return Err(IndicatorError::InsufficientData {
                required: MIN_CANDLES,
                actual: series.closes.len(),
            });
        }

        Ok(series)
    }
}

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute the snapshot for one asset/timeframe.
    pub fn snapshot(timeframe: Timeframe, candles: &[Candle]) -> TimeframeSnapshot {
        let series = match PriceSeries::prepare(candles) {
            Ok(series) => series,
            Err(e) => {
                debug!(timeframe = %timeframe, error = %e, "IndicatorEngine: snapshot unavailable");
                return TimeframeSnapshot::unavailable(timeframe);
            }
        };

        let emas = (
            Self::ema(&series.closes, 9),
            Self::ema(&series.closes, 20),
            Self::ema(&series.closes, 100),
        );
        let (Some(ema9), Some(ema20), Some(ema100)) = emas else {
            warn!(timeframe = %timeframe, "IndicatorEngine: EMA computation produced no value");
            return TimeframeSnapshot::unavailable(timeframe);
        };

        let macd_histogram = calculate_macd_default(&series.closes)
            .and_then(|macd| Self::publish(macd.histogram));
        let vwap = calculate_vwap(candles).and_then(|vwap| Self::publish(vwap.value));

        let (supertrend, trend) =
            match calculate_supertrend_default(&series.highs, &series.lows, &series.closes) {
                Some(st) => match Self::publish(st.value) {
                    Some(value) => (Some(value), st.trend),
                    None => (None, TrendFlag::default()),
                },
                None => (None, TrendFlag::default()),
            };

        TimeframeSnapshot {
            timeframe,
            ema9: Some(ema9),
            ema20: Some(ema20),
            ema100: Some(ema100),
            macd_histogram,
            vwap,
            supertrend,
            trend,
        }
    }

    /// Build all four timeframe snapshots for an asset. Missing series are
    /// treated as empty and therefore produce unavailable snapshots.
    pub fn asset_snapshot(
        symbol: &str,
        price: f64,
        candles: &BTreeMap<Timeframe, Vec<Candle>>,
    ) -> AssetSnapshot {
        AssetSnapshot::from_fn(symbol, price, |timeframe| {
            let series = candles.get(&timeframe).map(Vec::as_slice).unwrap_or(&[]);
            Self::snapshot(timeframe, series)
        })
    }

    fn ema(closes: &[f64], period: u32) -> Option<f64> {
        calculate_ema(closes, period).and_then(|ema| Self::publish(ema.value))
    }

    fn publish(value: f64) -> Option<f64> {
        value
            .is_finite()
            .then(|| math::round_to(value, SNAPSHOT_DECIMALS))
    }
}
