//! Unit tests for the shared numeric recurrences

use trendfunnel::common::math::{
    ema, ema_from_previous, ema_series, round_to, true_range, typical_price, wilder_step,
};

#[test]
fn test_ema_series_seeded_with_sma() {
    let series = ema_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert_eq!(series, vec![2.0, 3.0, 4.0]);
    assert_eq!(ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3), Some(4.0));
}

#[test]
fn test_ema_too_short() {
    assert!(ema_series(&[1.0, 2.0], 3).is_empty());
    assert_eq!(ema(&[1.0, 2.0], 3), None);
}

#[test]
fn test_ema_step() {
    // k = 2 / (3 + 1) = 0.5
    assert_eq!(ema_from_previous(10.0, 6.0, 3), 8.0);
}

#[test]
fn test_wilder_step() {
    assert_eq!(wilder_step(10.0, 20.0, 10), 11.0);
}

#[test]
fn test_true_range_takes_largest_gap() {
    assert_eq!(true_range(12.0, 9.0, 10.0), 3.0);
    assert_eq!(true_range(12.0, 9.0, 13.0), 4.0);
    assert_eq!(true_range(12.0, 9.0, 7.0), 5.0);
}

#[test]
fn test_round_to_six_decimals() {
    assert_eq!(round_to(1.234_567_89, 6), 1.234_568);
    assert_eq!(round_to(-0.000_000_4, 6), 0.0);
}

#[test]
fn test_typical_price() {
    assert_eq!(typical_price(3.0, 1.0, 2.0), 2.0);
}
