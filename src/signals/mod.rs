//! Trend funnel: global trend, active-trend filter, entry signals.

pub mod active_filter;
pub mod conditions;
pub mod entry;
pub mod global_trend;
pub mod pipeline;

pub use active_filter::{filter_active_tokens, is_actively_trending, ActiveTokens};
pub use conditions::Side;
pub use entry::{entry_confirmed, find_trades, log_trade_signals};
pub use global_trend::{analyze_global_trend, classify_global_trend, GlobalTrendResult, TrendBias};
pub use pipeline::CycleContext;
