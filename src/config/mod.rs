//! Environment-driven configuration.
//!
//! Every key is optional; unparseable values fall back to the default.

use std::env;
use std::time::Duration;

use backon::ExponentialBuilder;
use thiserror::Error;

pub const TELEGRAM_TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("period of {0}s cannot be expressed as a cron cadence")]
    UnsupportedPeriod(u64),
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Deployment environment, `sandbox` unless `ENVIRONMENT` says otherwise.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub base_url: String,
    pub bot_token: String,
    pub chat_id: String,
    pub bot_name: String,
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.is_empty()
            && !self.chat_id.is_empty()
            && self.bot_token != TELEGRAM_TOKEN_PLACEHOLDER
    }
}

/// Periods of the independent timers, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub token_refresh_seconds: u64,
    pub indicator_refresh_seconds: u64,
    pub signal_check_seconds: u64,
    pub notify_seconds: u64,
    pub stats_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    pub max_assets: usize,
    pub kline_limit: usize,
    pub listing_max_age_days: i64,
    pub batch_size: usize,
    pub request_delay_ms: u64,
    pub batch_delay_ms: u64,
}

impl CollectorConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

/// Exponential backoff for transient transport failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_delay_ms: u64,
}

impl RetryPolicy {
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.initial_delay_ms))
            .with_factor(2.0)
            .with_max_times(self.max_retries)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub environment: String,
    pub bybit_base_url: String,
    pub request_timeout_ms: u64,
    pub telegram: TelegramConfig,
    pub schedule: ScheduleConfig,
    pub collector: CollectorConfig,
    pub retry: RetryPolicy,
    pub restart_delay_seconds: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let request_delay_ms = number("REQUEST_DELAY_MS", 500);

        Self {
            environment: string("ENVIRONMENT", "sandbox"),
            bybit_base_url: string("BYBIT_BASE_URL", "https://api.bybit.com"),
            request_timeout_ms: number("REQUEST_TIMEOUT_MS", 10_000),
            telegram: TelegramConfig {
                base_url: string("TELEGRAM_BASE_URL", "https://api.telegram.org"),
                bot_token: string("TELEGRAM_BOT_TOKEN", ""),
                chat_id: string("TELEGRAM_CHAT_ID", ""),
                bot_name: string("BOT_NAME", "Trading Bot"),
            },
            schedule: ScheduleConfig {
                token_refresh_seconds: number("TOKEN_REFRESH_SECONDS", 6 * 60 * 60),
                indicator_refresh_seconds: number("INDICATOR_REFRESH_SECONDS", 10 * 60),
                signal_check_seconds: number("SIGNAL_CHECK_SECONDS", 30),
                notify_seconds: number("NOTIFY_SECONDS", 2 * 60),
                stats_seconds: number("STATS_SECONDS", 5 * 60),
            },
            collector: CollectorConfig {
                max_assets: number("MAX_ASSETS", 50) as usize,
                kline_limit: number("KLINE_LIMIT", 200) as usize,
                listing_max_age_days: number("LISTING_MAX_AGE_DAYS", 90) as i64,
                batch_size: number("BATCH_SIZE", 5).max(1) as usize,
                request_delay_ms,
                batch_delay_ms: number("BATCH_DELAY_MS", 2_000),
            },
            retry: RetryPolicy {
                max_retries: number("MAX_RETRIES", 3) as usize,
                initial_delay_ms: request_delay_ms,
            },
            restart_delay_seconds: number("RESTART_DELAY_SECONDS", 2 * 60),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
