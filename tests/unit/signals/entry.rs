//! Unit tests for the entry-signal detector

use chrono::{TimeZone, Utc};
use trendfunnel::models::{SignalDirection, SignalStrength, Timeframe, TimeframeSnapshot};
use trendfunnel::signals::conditions::ema_crossover_imminent;
use trendfunnel::signals::{entry_confirmed, find_trades, ActiveTokens, Side};

use crate::fixtures::{bearish_scenario, bullish_scenario, emas, shared};

#[test]
fn test_crossover_tolerance_boundary() {
    assert!(ema_crossover_imminent(Some(100.04), Some(100.0), Side::Bullish));
    assert!(!ema_crossover_imminent(Some(100.06), Some(100.0), Side::Bullish));

    assert!(ema_crossover_imminent(Some(99.96), Some(100.0), Side::Bearish));
    assert!(!ema_crossover_imminent(Some(99.94), Some(100.0), Side::Bearish));
}

#[test]
fn test_strong_signal_on_fifteen_minutes() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let active = ActiveTokens {
        active_bullish: shared(vec![bullish_scenario("AAAUSDT")]),
        active_bearish: Vec::new(),
    };

    let signals = find_trades(&active, at);

    assert_eq!(signals.len(), 1);
    let signal = &signals[0];
    assert_eq!(signal.symbol, "AAAUSDT");
    assert_eq!(signal.direction, SignalDirection::Long);
    assert_eq!(signal.timeframe, Timeframe::M15);
    assert_eq!(signal.strength, SignalStrength::Strong);
    assert_eq!(signal.price, 105.0);
    assert_eq!(signal.timestamp, at);
}

#[test]
fn test_both_timeframes_can_fire() {
    let mut candidate = bullish_scenario("AAAUSDT");
    candidate.tf3 = TimeframeSnapshot {
        macd_histogram: Some(0.001),
        ..emas(Timeframe::M3, 104.02, 104.0, 104.5)
    };
    assert!(entry_confirmed(&candidate, Timeframe::M3, Side::Bullish));

    let active = ActiveTokens {
        active_bullish: shared(vec![candidate]),
        active_bearish: Vec::new(),
    };
    let signals = find_trades(&active, Utc::now());

    let order: Vec<(Timeframe, SignalStrength)> =
        signals.iter().map(|s| (s.timeframe, s.strength)).collect();
    assert_eq!(
        order,
        vec![
            (Timeframe::M15, SignalStrength::Strong),
            (Timeframe::M3, SignalStrength::Regular),
        ]
    );
}

#[test]
fn test_established_crossover_does_not_fire() {
    let mut candidate = bullish_scenario("AAAUSDT");
    candidate.tf15.ema9 = Some(100.5);
    assert!(!entry_confirmed(&candidate, Timeframe::M15, Side::Bullish));
}

#[test]
fn test_bullish_signals_come_before_bearish() {
    let active = ActiveTokens {
        active_bullish: shared(vec![bullish_scenario("AAAUSDT"), bullish_scenario("CCCUSDT")]),
        active_bearish: shared(vec![bearish_scenario("BBBUSDT")]),
    };

    let signals = find_trades(&active, Utc::now());
    let summary: Vec<(&str, SignalDirection)> =
        signals.iter().map(|s| (s.symbol.as_str(), s.direction)).collect();

    assert_eq!(
        summary,
        vec![
            ("AAAUSDT", SignalDirection::Long),
            ("CCCUSDT", SignalDirection::Long),
            ("BBBUSDT", SignalDirection::Short),
        ]
    );
}

#[test]
fn test_no_active_assets_no_signals() {
    assert!(find_trades(&ActiveTokens::default(), Utc::now()).is_empty());
}
