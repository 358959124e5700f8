//! Composite signal assembly: candlestick, chart and indicator votes blended
//! under trend-dependent weights.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{IndicatorError, SignalError};
use crate::signals::engine::compute_indicators;
use crate::signals::levels::calculate_price_levels;
use crate::signals::patterns::{detect_candlestick_patterns, detect_chart_patterns};
use crate::signals::ta;
use crate::types::{
    candle::closes, Candle, ComponentScore, ComponentWeights, IndicatorConfig, IndicatorSummary,
    PatternSummary, PriceLevelConfig, RawScores, SignalBreakdown, SignalLabel, SignalResult,
    TradeParams,
};

/// Aroon period used for the trend-strength gate, independent of the Aroon
/// indicator's configured period.
const TREND_PERIOD: usize = 25;

fn direction_word(signal: f64) -> &'static str {
    if signal > 0.0 {
        "Bullish"
    } else if signal < 0.0 {
        "Bearish"
    } else {
        "Neutral"
    }
}

/// Generate a composite trading signal from a candle series.
///
/// The three component scores (candlestick pattern, chart pattern, indicator
/// average) are each a vote in [-1,1] scaled by confidence. A strong trend
/// (|Aroon oscillator| > 50 over 25 periods) shifts weight toward the
/// indicators; a weak trend toward the patterns. Indicator failures degrade
/// to neutral and never abort the signal.
pub fn generate_trading_signal(
    candles: &[Candle],
    config: &IndicatorConfig,
    level_config: &PriceLevelConfig,
    trade: &TradeParams,
) -> Result<SignalResult, SignalError> {
    if candles.len() < 2 {
        return Err(SignalError::InsufficientCandles(candles.len()));
    }

    let candle_pattern = detect_candlestick_patterns(candles, config);
    let chart_pattern = detect_chart_patterns(candles, config);
    let indicators = match compute_indicators(candles, config) {
        Ok(results) => results,
        Err(IndicatorError::InsufficientData { required, len }) => {
            warn!(required, len, "indicator batch skipped, not enough candles");
            Vec::new()
        }
        Err(err) => return Err(SignalError::Aggregation(err.to_string())),
    };

    let closes = closes(candles);
    let trend_strength =
        ta::aroon_osc(&closes, TREND_PERIOD).last().map_or(0.0, |v| v.abs());
    let weights = if trend_strength > 50.0 {
        ComponentWeights { candle: 0.15, chart: 0.30, indicators: 0.55 }
    } else {
        ComponentWeights { candle: 0.20, chart: 0.35, indicators: 0.45 }
    };

    let candle_score = candle_pattern.signal * candle_pattern.strength;
    let chart_score = chart_pattern.signal * chart_pattern.strength;
    let indicator_score = if indicators.is_empty() {
        0.0
    } else {
        indicators.iter().map(|i| i.signal * i.strength).sum::<f64>() / indicators.len() as f64
    };

    let composite_score = candle_score * weights.candle
        + chart_score * weights.chart
        + indicator_score * weights.indicators;
    let signal = SignalLabel::from_score(composite_score);
    debug!(
        composite_score,
        trend_strength,
        label = signal.label(),
        "composite signal assembled"
    );

    let mut component_scores = Vec::with_capacity(indicators.len() + 2);
    component_scores.push(ComponentScore {
        name: "Candlestick Patterns".to_string(),
        score: candle_score * weights.candle,
        details: candle_pattern.pattern.clone(),
        display: format!(
            "{}: {:.2} ({})",
            candle_pattern.pattern,
            candle_pattern.signal,
            direction_word(candle_pattern.signal)
        ),
    });
    component_scores.push(ComponentScore {
        name: "Chart Patterns".to_string(),
        score: chart_score * weights.chart,
        details: chart_pattern.pattern.clone(),
        display: format!(
            "{}: {:.2} ({})",
            chart_pattern.pattern,
            chart_pattern.signal,
            direction_word(chart_pattern.signal)
        ),
    });
    for indicator in &indicators {
        component_scores.push(ComponentScore {
            name: indicator.name.clone(),
            score: indicator.signal * indicator.strength * weights.indicators
                / indicators.len() as f64,
            details: direction_word(indicator.signal).to_string(),
            display: indicator.display.clone(),
        });
    }

    let details = SignalBreakdown {
        trend_strength,
        weights,
        raw_scores: RawScores {
            candle: candle_score,
            chart: chart_score,
            indicators: indicator_score,
        },
        candlestick: PatternSummary {
            pattern: candle_pattern.pattern,
            strength: candle_pattern.strength,
        },
        chart: PatternSummary { pattern: chart_pattern.pattern, strength: chart_pattern.strength },
        indicators: indicators
            .iter()
            .map(|i| IndicatorSummary {
                name: i.name.clone(),
                signal: direction_word(i.signal).to_string(),
                strength: i.strength,
            })
            .collect(),
    };

    let price_levels = calculate_price_levels(candles, signal, level_config, trade);

    Ok(SignalResult {
        signal,
        composite_score,
        component_scores,
        price_levels,
        details,
        timestamp: Utc::now().timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{flat, uptrend};

    fn generate(candles: &[Candle], config: &IndicatorConfig) -> SignalResult {
        generate_trading_signal(
            candles,
            config,
            &PriceLevelConfig::default(),
            &TradeParams::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_candles_is_an_error() {
        let err = generate_trading_signal(
            &flat(1, 100.0),
            &IndicatorConfig::default(),
            &PriceLevelConfig::default(),
            &TradeParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SignalError::InsufficientCandles(1)));
    }

    #[test]
    fn test_strong_trend_shifts_weight_to_indicators() {
        let result = generate(&uptrend(120), &IndicatorConfig::all_enabled());
        assert!(result.details.trend_strength > 50.0);
        assert_eq!(result.details.weights.candle, 0.15);
        assert_eq!(result.details.weights.chart, 0.30);
        assert_eq!(result.details.weights.indicators, 0.55);
    }

    #[test]
    fn test_weak_trend_favors_patterns() {
        let result = generate(&flat(60, 100.0), &IndicatorConfig::default());
        assert_eq!(result.details.trend_strength, 0.0);
        assert_eq!(result.details.weights.candle, 0.20);
        assert_eq!(result.details.weights.chart, 0.35);
        assert_eq!(result.details.weights.indicators, 0.45);
    }

    #[test]
    fn test_component_scores_sum_to_composite() {
        let result = generate(&uptrend(120), &IndicatorConfig::all_enabled());
        let sum: f64 = result.component_scores.iter().map(|c| c.score).sum();
        assert!((sum - result.composite_score).abs() < 1e-9);
    }

    #[test]
    fn test_label_agrees_with_score() {
        let result = generate(&uptrend(120), &IndicatorConfig::all_enabled());
        assert_eq!(result.signal, SignalLabel::from_score(result.composite_score));
    }

    #[test]
    fn test_indicator_shortage_degrades_to_patterns_only() {
        // RSI(14) needs more candles than this; the batch is skipped but the
        // signal still comes out of the two pattern detectors.
        let mut config = IndicatorConfig::default();
        config.rsi.enabled = true;
        let result = generate(&flat(10, 100.0), &config);
        assert_eq!(result.component_scores.len(), 2);
        assert!(result.details.indicators.is_empty());
        assert_eq!(result.details.raw_scores.indicators, 0.0);
    }

    #[test]
    fn test_price_levels_follow_the_label() {
        let result = generate(&uptrend(120), &IndicatorConfig::all_enabled());
        assert_eq!(result.price_levels.signal, result.signal);
    }
}
