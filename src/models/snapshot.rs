//! Per-cycle indicator snapshots.
//!
//! Every indicator reading is an `Option<f64>`: `None` is the "unavailable"
//! sentinel and is what gating checks look at. Generic numeric comparisons read
//! the same fields through [`crate::indicators::parser::or_zero`], which maps
//! the sentinel to `0.0`. The two policies decide different boundary cases
//! downstream and are not interchangeable.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    M3,
    M15,
    M60,
    M240,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M3, Timeframe::M15, Timeframe::M60, Timeframe::M240];

    pub fn minutes(self) -> u32 {
        match self {
            Timeframe::M3 => 3,
            Timeframe::M15 => 15,
            Timeframe::M60 => 60,
            Timeframe::M240 => 240,
        }
    }

    /// Interval code used by the exchange kline endpoint.
    pub fn interval(self) -> &'static str {
        match self {
            Timeframe::M3 => "3",
            Timeframe::M15 => "15",
            Timeframe::M60 => "60",
            Timeframe::M240 => "240",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.minutes())
    }
}

/// Supertrend direction. Defaults to `Up` when the Supertrend is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendFlag {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSnapshot {
    pub timeframe: Timeframe,
    pub ema9: Option<f64>,
    pub ema20: Option<f64>,
    pub ema100: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub vwap: Option<f64>,
    pub supertrend: Option<f64>,
    pub trend: TrendFlag,
}

impl TimeframeSnapshot {
    /// Snapshot with every reading unavailable and the trend defaulted to up.
    pub fn unavailable(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ema9: None,
            ema20: None,
            ema100: None,
            macd_histogram: None,
            vwap: None,
            supertrend: None,
            trend: TrendFlag::default(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.ema9.is_none()
            && self.ema20.is_none()
            && self.ema100.is_none()
            && self.macd_histogram.is_none()
            && self.vwap.is_none()
            && self.supertrend.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub price: f64,
    pub tf3: TimeframeSnapshot,
    pub tf15: TimeframeSnapshot,
    pub tf60: TimeframeSnapshot,
    pub tf240: TimeframeSnapshot,
}

impl AssetSnapshot {
    /// Build from a per-timeframe factory, guaranteeing all four timeframes.
    pub fn from_fn(
        symbol: impl Into<String>,
        price: f64,
        mut snapshot: impl FnMut(Timeframe) -> TimeframeSnapshot,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            tf3: snapshot(Timeframe::M3),
            tf15: snapshot(Timeframe::M15),
            tf60: snapshot(Timeframe::M60),
            tf240: snapshot(Timeframe::M240),
        }
    }

    pub fn timeframe(&self, timeframe: Timeframe) -> &TimeframeSnapshot {
        match timeframe {
            Timeframe::M3 => &self.tf3,
            Timeframe::M15 => &self.tf15,
            Timeframe::M60 => &self.tf60,
            Timeframe::M240 => &self.tf240,
        }
    }
}
