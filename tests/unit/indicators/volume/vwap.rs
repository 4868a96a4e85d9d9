//! Unit tests for VWAP indicator

use trendfunnel::common::math::typical_price;
use trendfunnel::indicators::volume::calculate_vwap;
use trendfunnel::models::Candle;

#[test]
fn test_vwap_weights_by_volume() {
    let candles = vec![
        Candle::new(10.0, 12.0, 9.0, 12.0, 100.0), // typical 11
        Candle::new(20.0, 22.0, 19.0, 22.0, 300.0), // typical 21
    ];

    let vwap = calculate_vwap(&candles).unwrap();
    assert_eq!(vwap.samples, 2);
    assert!((vwap.value - (11.0 * 100.0 + 21.0 * 300.0) / 400.0).abs() < 1e-9);
}

#[test]
fn test_vwap_skips_invalid_candles() {
    let mut broken = Candle::new(10.0, 12.0, 9.0, 12.0, 100.0);
    broken.volume = None;

    let candles = vec![
        broken,
        Candle::default(),
        Candle::new(20.0, 22.0, 19.0, 22.0, 300.0),
    ];

    let vwap = calculate_vwap(&candles).unwrap();
    assert_eq!(vwap.samples, 1);
    assert!((vwap.value - 21.0).abs() < 1e-9);
}

#[test]
fn test_vwap_unavailable_without_volume() {
    assert!(calculate_vwap(&[]).is_none());
    assert!(calculate_vwap(&[Candle::new(10.0, 12.0, 9.0, 12.0, 0.0)]).is_none());
    assert!(calculate_vwap(&[Candle::default()]).is_none());
}

#[test]
fn test_vwap_within_typical_price_bounds() {
    let candles: Vec<Candle> = (0..50)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.7).sin() * 5.0;
            Candle::new(close, close + 1.5, close - 2.0, close, 10.0 + (i % 7) as f64 * 40.0)
        })
        .collect();

    let typicals: Vec<f64> = candles
        .iter()
        .map(|c| typical_price(c.high.unwrap(), c.low.unwrap(), c.close.unwrap()))
        .collect();
    let min = typicals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = typicals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let vwap = calculate_vwap(&candles).unwrap().value;
    assert!(vwap >= min && vwap <= max);
}
