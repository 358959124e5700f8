//! End-to-end tests for the signal pipeline: indicator batch, pattern
//! detectors and the composite aggregator, exercised through the public API.

use seance::{
    compute_indicators, detect_candlestick_patterns, detect_chart_patterns,
    generate_trading_signal, Candle, IndicatorConfig, PriceLevelConfig, SignalLabel, TradeParams,
};

fn candle(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    let open_time = 1_700_000_000_000 + i as i64 * 60_000;
    Candle {
        open_time,
        open,
        high,
        low,
        close,
        volume,
        close_time: open_time + 59_999,
        quote_volume: volume * close,
    }
}

fn flat(count: usize, price: f64) -> Vec<Candle> {
    (0..count).map(|i| candle(i, price, price, price, price, 1000.0)).collect()
}

fn uptrend(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 1.5;
            candle(i, base, base + 2.0, base - 1.0, base + 1.0, 1000.0)
        })
        .collect()
}

fn generate(candles: &[Candle], config: &IndicatorConfig) -> seance::SignalResult {
    generate_trading_signal(candles, config, &PriceLevelConfig::default(), &TradeParams::default())
        .unwrap()
}

#[test]
fn test_full_pipeline_with_everything_enabled() {
    let result = generate(&uptrend(120), &IndicatorConfig::all_enabled());

    // Two pattern components plus one entry per enabled indicator.
    assert_eq!(result.component_scores.len(), 2 + 19);
    assert!(result.composite_score.is_finite());
    assert_eq!(result.signal, SignalLabel::from_score(result.composite_score));
    assert_eq!(result.price_levels.signal, result.signal);
    assert!(result.timestamp > 0);
}

#[test]
fn test_one_result_per_enabled_indicator() {
    let results = compute_indicators(&uptrend(120), &IndicatorConfig::all_enabled()).unwrap();
    assert_eq!(results.len(), 19);
    let mut names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 19, "indicator names must be unique");
}

#[test]
fn test_failed_indicator_degrades_to_neutral_stub() {
    // RSI is undefined on a flat series (no gains, no losses); the batch
    // still returns a slot for it.
    let mut config = IndicatorConfig::default();
    config.rsi.enabled = true;
    let results = compute_indicators(&flat(30, 100.0), &config).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "RSI");
    assert_eq!(results[0].signal, 0.0);
    assert_eq!(results[0].strength, 0.0);
    assert!(results[0].display.contains("Error"), "{}", results[0].display);
}

#[test]
fn test_trend_strength_selects_weights() {
    let strong = generate(&uptrend(120), &IndicatorConfig::all_enabled());
    assert!(strong.details.trend_strength > 50.0);
    assert_eq!(
        (strong.details.weights.candle, strong.details.weights.chart, strong.details.weights.indicators),
        (0.15, 0.30, 0.55)
    );

    let weak = generate(&flat(60, 100.0), &IndicatorConfig::default());
    assert_eq!(weak.details.trend_strength, 0.0);
    assert_eq!(
        (weak.details.weights.candle, weak.details.weights.chart, weak.details.weights.indicators),
        (0.20, 0.35, 0.45)
    );
}

#[test]
fn test_flat_series_resolves_to_support_weak_buy() {
    // Flat closes sit exactly on the projected support line: no candlestick
    // pattern, chart score 0.9, no indicators. Composite = 0.9 * 0.35.
    let result = generate(&flat(60, 100.0), &IndicatorConfig::default());
    assert_eq!(result.details.candlestick.pattern, "None");
    assert_eq!(result.details.chart.pattern, "Support");
    assert!((result.composite_score - 0.315).abs() < 1e-9);
    assert_eq!(result.signal, SignalLabel::WeakBuy);
    assert_eq!(result.price_levels.entry_price, "100.00000000");
}

#[test]
fn test_marubozu_takes_priority() {
    let mut candles = flat(6, 100.0);
    candles.push(candle(6, 100.0, 110.0, 100.0, 110.0, 1000.0));
    let result = detect_candlestick_patterns(&candles, &IndicatorConfig::default());
    assert_eq!(result.pattern, "Bullish Marubozu");
    assert_eq!(result.signal, 1.0);
}

#[test]
fn test_strongest_chart_pattern_wins() {
    let result = detect_chart_patterns(&flat(60, 100.0), &IndicatorConfig::default());
    // Demand and Supply zones (0.8) also match on flat data; Support (0.9)
    // must win.
    assert_eq!(result.pattern, "Support");
    assert_eq!(result.strength, 0.9);
}

#[test]
fn test_result_serializes_camel_case() {
    let result = generate(&flat(60, 100.0), &IndicatorConfig::default());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["signal"], "Weak Buy");
    assert!(json["compositeScore"].is_number());
    assert!(json["priceLevels"]["entryPrice"].is_string());
    assert!(json["details"]["trendStrength"].is_number());
    assert!(json["details"]["rawScores"]["chart"].is_number());
}

#[test]
fn test_single_candle_is_rejected() {
    let err = generate_trading_signal(
        &flat(1, 100.0),
        &IndicatorConfig::default(),
        &PriceLevelConfig::default(),
        &TradeParams::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("got 1"));
}
