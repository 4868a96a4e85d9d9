//! Human-readable summaries for the notification sink.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::telegram::escape_markdown;
use crate::models::TradeSignal;
use crate::signals::CycleContext;

/// Counts and signals of one cycle, ready to be rendered.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub analyzed: usize,
    pub global_bullish: usize,
    pub global_bearish: usize,
    pub global_neutral: usize,
    pub active_bullish: usize,
    pub active_bearish: usize,
    pub signals: Vec<TradeSignal>,
}

impl SummaryReport {
    pub fn from_cycle(
        title: impl Into<String>,
        cycle: &CycleContext,
        signals: Vec<TradeSignal>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            generated_at,
            analyzed: cycle.asset_count(),
            global_bullish: cycle.global_trend.bullish.len(),
            global_bearish: cycle.global_trend.bearish.len(),
            global_neutral: cycle.global_trend.neutral.len(),
            active_bullish: cycle.active.active_bullish.len(),
            active_bearish: cycle.active.active_bearish.len(),
            signals,
        }
    }

    pub fn active_total(&self) -> usize {
        self.active_bullish + self.active_bearish
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "*{}*", escape_markdown(&self.title));
        let _ = writeln!(out, "{}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        out.push('\n');

        let _ = writeln!(out, "*Global trend* ({} analyzed)", self.analyzed);
        let _ = writeln!(out, "Bullish: {}", self.global_bullish);
        let _ = writeln!(out, "Bearish: {}", self.global_bearish);
        let _ = writeln!(out, "Neutral: {}", self.global_neutral);
        out.push('\n');

        let _ = writeln!(out, "*Active trend*");
        let _ = writeln!(out, "Bullish: {}", self.active_bullish);
        let _ = writeln!(out, "Bearish: {}", self.active_bearish);
        let _ = writeln!(out, "Total: {}", self.active_total());
        out.push('\n');

        if self.signals.is_empty() {
            out.push_str("No entry signals this cycle");
        } else {
            let _ = writeln!(out, "*Signals* ({})", self.signals.len());
            for signal in &self.signals {
                let _ = writeln!(out, "{}", signal_line(signal));
            }
        }

        out.trim_end().to_string()
    }
}

pub fn signal_line(signal: &TradeSignal) -> String {
    format!(
        "{} {} {} {} @ {:.4}",
        escape_markdown(&signal.symbol),
        signal.direction,
        signal.timeframe,
        signal.strength,
        signal.price
    )
}

pub fn started_message(bot_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "*{}* started\n{}",
        escape_markdown(bot_name),
        at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub fn stopped_message(bot_name: &str, reason: Option<&str>, at: DateTime<Utc>) -> String {
    let mut out = format!(
        "*{}* stopped\n{}",
        escape_markdown(bot_name),
        at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(reason) = reason {
        let _ = write!(out, "\nReason: {}", escape_markdown(reason));
    }
    out
}
