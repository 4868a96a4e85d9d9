//! Multi-timeframe trend funnel for Bybit linear perpetuals.
//!
//! Candles are turned into per-timeframe indicator snapshots, which flow through
//! three classification stages (global trend, active trend, entry signal).

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod services;
pub mod signals;
