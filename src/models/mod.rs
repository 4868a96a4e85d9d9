//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod snapshot;

pub use indicators::{
    AtrIndicator, Candle, EmaIndicator, MacdIndicator, SuperTrendIndicator, VwapIndicator,
};
pub use signal::{SignalDirection, SignalStrength, TradeSignal};
pub use snapshot::{AssetSnapshot, Timeframe, TimeframeSnapshot, TrendFlag};
