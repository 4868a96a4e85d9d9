//! Unit tests for the global trend classifier

use std::collections::HashSet;

use trendfunnel::models::{Timeframe, TimeframeSnapshot, TrendFlag};
use trendfunnel::signals::{analyze_global_trend, classify_global_trend, TrendBias};

use crate::fixtures::{asset, bearish_scenario, bullish_scenario, emas, shared, unavailable};

fn trending(timeframe: Timeframe, ema20: f64, ema100: f64, supertrend: Option<f64>, trend: TrendFlag) -> TimeframeSnapshot {
    TimeframeSnapshot {
        supertrend,
        trend,
        ..emas(timeframe, ema20, ema20, ema100)
    }
}

#[test]
fn test_missing_ema100_is_neutral() {
    let mut candidate = bullish_scenario("AAAUSDT");
    candidate.tf240.ema100 = None;
    assert_eq!(classify_global_trend(&candidate), TrendBias::Neutral);

    let mut candidate = bullish_scenario("AAAUSDT");
    candidate.tf60 = unavailable(Timeframe::M60);
    assert_eq!(classify_global_trend(&candidate), TrendBias::Neutral);
}

#[test]
fn test_both_timeframes_agree() {
    assert_eq!(classify_global_trend(&bullish_scenario("AAAUSDT")), TrendBias::Bullish);
    assert_eq!(classify_global_trend(&bearish_scenario("BBBUSDT")), TrendBias::Bearish);
}

#[test]
fn test_hourly_bullish_wins_over_undecided_four_hour() {
    // 240m: price above EMA100 but below EMA20, neither side
    let candidate = asset(
        "CCCUSDT",
        105.0,
        unavailable(Timeframe::M3),
        unavailable(Timeframe::M15),
        trending(Timeframe::M60, 102.0, 100.0, Some(99.0), TrendFlag::Up),
        trending(Timeframe::M240, 106.0, 104.0, Some(99.0), TrendFlag::Up),
    );
    assert_eq!(classify_global_trend(&candidate), TrendBias::Bullish);
}

#[test]
fn test_opposing_four_hour_makes_neutral() {
    let candidate = asset(
        "DDDUSDT",
        105.0,
        unavailable(Timeframe::M3),
        unavailable(Timeframe::M15),
        trending(Timeframe::M60, 102.0, 100.0, Some(99.0), TrendFlag::Up),
        trending(Timeframe::M240, 108.0, 110.0, Some(112.0), TrendFlag::Down),
    );
    assert_eq!(classify_global_trend(&candidate), TrendBias::Neutral);
}

#[test]
fn test_unavailable_supertrend_reads_as_zero() {
    // price > 0 passes the bullish supertrend check
    let mut bullish = bullish_scenario("EEEUSDT");
    bullish.tf240.supertrend = None;
    assert_eq!(classify_global_trend(&bullish), TrendBias::Bullish);

    // price < 0 never holds: 240m stops being bearish, 60m alone still decides
    let mut bearish = bearish_scenario("FFFUSDT");
    bearish.tf240.supertrend = None;
    assert_eq!(classify_global_trend(&bearish), TrendBias::Bearish);
    bearish.tf60.supertrend = None;
    assert_eq!(classify_global_trend(&bearish), TrendBias::Neutral);
}

#[test]
fn test_default_up_flag_blocks_bearish() {
    let mut candidate = bearish_scenario("GGGUSDT");
    candidate.tf60.trend = TrendFlag::Up;
    candidate.tf240.trend = TrendFlag::Up;
    assert_eq!(classify_global_trend(&candidate), TrendBias::Neutral);
}

#[test]
fn test_partition_is_disjoint_and_exhaustive() {
    let mut neutral = bullish_scenario("NEUTRALUSDT");
    neutral.tf60.ema100 = None;

    let assets = shared(vec![
        bullish_scenario("AAAUSDT"),
        bearish_scenario("BBBUSDT"),
        neutral,
        bullish_scenario("CCCUSDT"),
    ]);
    let result = analyze_global_trend(&assets);

    assert_eq!(result.len(), assets.len());
    let symbols: HashSet<&str> = result
        .bullish
        .iter()
        .chain(&result.bearish)
        .chain(&result.neutral)
        .map(|a| a.symbol.as_str())
        .collect();
    assert_eq!(symbols.len(), assets.len());

    let bullish: Vec<&str> = result.bullish.iter().map(|a| a.symbol.as_str()).collect();
    assert_eq!(bullish, vec!["AAAUSDT", "CCCUSDT"]);
    assert_eq!(result.bearish[0].symbol, "BBBUSDT");
    assert_eq!(result.neutral[0].symbol, "NEUTRALUSDT");
}

#[test]
fn test_empty_input() {
    let result = analyze_global_trend(&[]);
    assert!(result.is_empty());
}
