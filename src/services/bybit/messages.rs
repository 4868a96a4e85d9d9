//! Bybit v5 REST payloads.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::indicators::parser::parse_field;
use crate::models::Candle;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitResponse<T> {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    pub result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListResult<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub symbol: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub launch_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    pub last_price: String,
}

/// `[startTime, open, high, low, close, volume, turnover]`, newest row first.
pub type KlineRow = Vec<Value>;

/// Convert one kline row. Unparseable fields become `None`; rows shorter than
/// six fields lose their volume and therefore never count towards VWAP.
pub fn candle_from_row(row: &[Value]) -> Candle {
    let field = |index: usize| row.get(index).and_then(parse_field);

    Candle {
        open_time: field(0).and_then(|ms| DateTime::<Utc>::from_timestamp_millis(ms as i64)),
        open: field(1),
        high: field(2),
        low: field(3),
        close: field(4),
        volume: field(5),
    }
}
