use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timeframe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Long => write!(f, "LONG"),
            SignalDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// STRONG signals come from the 15-minute check, REGULAR from the 3-minute one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStrength {
    Strong,
    Regular,
}

impl SignalStrength {
    pub fn for_timeframe(timeframe: Timeframe) -> Self {
        match timeframe {
            Timeframe::M15 => SignalStrength::Strong,
            _ => SignalStrength::Regular,
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalStrength::Strong => write!(f, "STRONG"),
            SignalStrength::Regular => write!(f, "REGULAR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub symbol: String,
    pub direction: SignalDirection,
    pub timeframe: Timeframe,
    pub price: f64,
    pub strength: SignalStrength,
    pub timestamp: DateTime<Utc>,
}
