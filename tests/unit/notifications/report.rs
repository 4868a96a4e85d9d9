//! Unit tests for summary formatting

use chrono::{TimeZone, Utc};
use trendfunnel::models::{SignalDirection, SignalStrength, Timeframe, TradeSignal};
use trendfunnel::notifications::report::signal_line;
use trendfunnel::notifications::telegram::escape_markdown;
use trendfunnel::notifications::{started_message, stopped_message, SummaryReport};
use trendfunnel::signals::CycleContext;

use crate::fixtures::{bearish_scenario, bullish_scenario, shared};

fn signal(symbol: &str, price: f64) -> TradeSignal {
    TradeSignal {
        symbol: symbol.to_string(),
        direction: SignalDirection::Long,
        timeframe: Timeframe::M15,
        price,
        strength: SignalStrength::Strong,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_signal_line_formats_price_to_four_decimals() {
    assert_eq!(
        signal_line(&signal("AAAUSDT", 105.0)),
        "AAAUSDT LONG 15m STRONG @ 105.0000"
    );
    assert!(signal_line(&signal("AAAUSDT", 0.123456)).ends_with("@ 0.1235"));
}

#[test]
fn test_escape_markdown() {
    assert_eq!(escape_markdown("1000_PEPE*"), "1000\\_PEPE\\*");
    assert_eq!(escape_markdown("BTCUSDT"), "BTCUSDT");
}

#[test]
fn test_report_counts_and_signals() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    let cycle = CycleContext::evaluate(
        shared(vec![bullish_scenario("AAAUSDT"), bearish_scenario("BBBUSDT")]),
        at,
    );
    let signals = cycle.detect_signals(at);

    let report = SummaryReport::from_cycle("Trade signals", &cycle, signals, at);
    assert_eq!(report.global_bullish, 1);
    assert_eq!(report.global_bearish, 1);
    assert_eq!(report.active_total(), 2);

    let text = report.render();
    assert!(text.starts_with("*Trade signals*"));
    assert!(text.contains("2024-05-01 12:30:00 UTC"));
    assert!(text.contains("Total: 2"));
    assert!(text.contains("*Signals* (2)"));
    assert!(text.contains("AAAUSDT LONG 15m STRONG @ 105.0000"));
    assert!(text.contains("BBBUSDT SHORT 15m STRONG @ 95.0000"));
}

#[test]
fn test_report_without_signals() {
    let cycle = CycleContext::evaluate(Vec::new(), Utc::now());
    let text = SummaryReport::from_cycle("Regular update", &cycle, Vec::new(), Utc::now()).render();

    assert!(text.ends_with("No entry signals this cycle"));
    assert!(text.contains("Total: 0"));
}

#[test]
fn test_start_and_stop_messages() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

    assert_eq!(started_message("Trading Bot", at), "*Trading Bot* started\n2024-05-01 08:00:00 UTC");
    assert!(stopped_message("Trading Bot", Some("Stopped by user"), at).ends_with("Reason: Stopped by user"));
    assert!(!stopped_message("Trading Bot", None, at).contains("Reason"));
}
