use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar as delivered by the exchange.
///
/// Fields that failed to parse are `None`; the bar still keeps its place in the
/// series so positional calculations see the same sequence the exchange sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<DateTime<Utc>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            open_time: None,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<(u32, u32, u32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperTrendIndicator {
    pub value: f64,
    pub trend: super::TrendFlag,
    pub upper_band: f64,
    pub lower_band: f64,
    pub period: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VwapIndicator {
    pub value: f64,
    /// Number of candles that contributed to the average.
    pub samples: usize,
}
