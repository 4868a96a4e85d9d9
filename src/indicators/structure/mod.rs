//! Market structure indicators: SuperTrend

pub mod supertrend;

pub use supertrend::*;
