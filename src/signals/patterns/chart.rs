//! Chart pattern detection: collect every matching candidate, strongest wins.

use tracing::debug;

use crate::signals::ta;
use crate::signals::ta::{Swing, SwingKind};
use crate::types::{
    candle::{closes, highs, lows, volumes},
    Candle, IndicatorConfig, PatternResult,
};

fn push(patterns: &mut Vec<PatternResult>, signal: f64, strength: f64, pattern: &str) {
    patterns.push(PatternResult { signal, strength, pattern: pattern.to_string() });
}

/// Support/Resistance proximity, an if/else-if chain: the tighter band wins
/// and suppresses the looser Support Zone.
fn level_proximity(
    patterns: &mut Vec<PatternResult>,
    price: f64,
    support: Option<f64>,
    resistance: Option<f64>,
) {
    if let Some(s) = support {
        if (price - s).abs() / price < 0.015 {
            push(patterns, 1.0, 0.9, "Support");
            return;
        }
    }
    if let Some(r) = resistance {
        if (price - r).abs() / price < 0.015 {
            push(patterns, -1.0, 0.9, "Resistance");
            return;
        }
    }
    if let Some(s) = support {
        if (price - s).abs() / price < 0.03 {
            push(patterns, 1.0, 0.75, "Support Zone");
        }
    }
}

/// At least three of the last 15 lows within 2% of price, with price at or
/// under the projected support (mirrored for supply with highs/resistance).
fn accumulation_zones(
    patterns: &mut Vec<PatternResult>,
    highs: &[f64],
    lows: &[f64],
    volumes: &[f64],
    price: f64,
    avg_volume: f64,
    support: Option<f64>,
    resistance: Option<f64>,
) {
    let last_volume = volumes.last().copied().unwrap_or(0.0);
    let strength = if last_volume > avg_volume * 1.5 { 0.9 } else { 0.8 };

    let tail = |values: &[f64]| values[values.len().saturating_sub(15)..].to_vec();
    let near = |values: &[f64]| {
        values.iter().filter(|v| (**v - price).abs() / **v < 0.02).count() >= 3
    };

    if let Some(s) = support {
        if near(&tail(lows)) && price <= s {
            push(patterns, 1.0, strength, "Demand Zone");
        }
    }
    if let Some(r) = resistance {
        if near(&tail(highs)) && price >= r {
            push(patterns, -1.0, strength, "Supply Zone");
        }
    }
}

/// Flat highs (every other high within 1%) over rising lows with a breakout
/// above resistance; descending triangle is the mirror.
fn triangles(
    patterns: &mut Vec<PatternResult>,
    highs: &[f64],
    lows: &[f64],
    price: f64,
    support: Option<f64>,
    resistance: Option<f64>,
) {
    let hi = &highs[highs.len().saturating_sub(15)..];
    let lo = &lows[lows.len().saturating_sub(15)..];

    let flat = |values: &[f64]| {
        values
            .iter()
            .enumerate()
            .all(|(i, v)| i <= 2 || (v - values[i - 2]).abs() < 0.01 * v)
    };
    let rising = |values: &[f64]| values.windows(2).all(|w| w[1] > w[0]);
    let falling = |values: &[f64]| values.windows(2).all(|w| w[1] < w[0]);

    if let Some(r) = resistance {
        if flat(hi) && rising(lo) && price > r {
            push(patterns, 1.0, 0.85, "Ascending Triangle");
        }
    }
    if let Some(s) = support {
        if flat(lo) && falling(hi) && price < s {
            push(patterns, -1.0, 0.85, "Descending Triangle");
        }
    }
}

fn swing_prices(swings: &[Swing], kind: SwingKind) -> Vec<f64> {
    swings.iter().filter(|s| s.kind == kind).map(|s| s.price).collect()
}

/// Double Top: middle swing peaks over both neighbours, the retest swing
/// within 1% of the peak, and price already under the trough between them.
fn double_extremes(patterns: &mut Vec<PatternResult>, swings: &[Swing], price: f64) {
    if swings.len() < 5 {
        return;
    }
    let last: Vec<f64> = swings[swings.len() - 5..].iter().map(|s| s.price).collect();
    let (s2, s3, s4, s5) = (last[1], last[2], last[3], last[4]);

    let double_top =
        s3 > s2 && s3 > s4 && (s3 - s5).abs() / s3 < 0.01 && s4 < s5 && price < s4;
    let double_bottom =
        s3 < s2 && s3 < s4 && (s3 - s5).abs() / s3 < 0.01 && s4 > s5 && price > s4;

    if double_top {
        push(patterns, -1.0, 0.85, "Double Top");
    } else if double_bottom {
        push(patterns, 1.0, 0.85, "Double Bottom");
    }
}

/// Converging swing highs and lows with a close beyond the latest extreme.
fn symmetrical_triangle(patterns: &mut Vec<PatternResult>, swings: &[Swing], price: f64) {
    let tail = &swings[swings.len().saturating_sub(10)..];
    if tail.len() < 6 {
        return;
    }
    let highs = swing_prices(tail, SwingKind::High);
    let lows = swing_prices(tail, SwingKind::Low);
    if highs.len() < 3 || lows.len() < 3 {
        return;
    }
    let converging_highs = highs.windows(2).all(|w| w[1] < w[0]);
    let converging_lows = lows.windows(2).all(|w| w[1] > w[0]);
    if !(converging_highs && converging_lows) {
        return;
    }
    if price > highs[highs.len() - 1] {
        push(patterns, 1.0, 0.85, "Symmetrical Triangle Breakout (Bullish)");
    } else if price < lows[lows.len() - 1] {
        push(patterns, -1.0, 0.85, "Symmetrical Triangle Breakout (Bearish)");
    }
}

/// Parallel swing trendlines; price relative to their one-step projections.
fn channel(patterns: &mut Vec<PatternResult>, swings: &[Swing], price: f64) {
    let tail = &swings[swings.len().saturating_sub(8)..];
    if tail.len() < 6 {
        return;
    }
    let highs = swing_prices(tail, SwingKind::High);
    let lows = swing_prices(tail, SwingKind::Low);
    let highs = &highs[highs.len().saturating_sub(3)..];
    let lows = &lows[lows.len().saturating_sub(3)..];
    if highs.len() < 2 || lows.len() < 2 {
        return;
    }

    let high_slope = (highs[highs.len() - 1] - highs[0]) / (highs.len() - 1) as f64;
    let low_slope = (lows[lows.len() - 1] - lows[0]) / (lows.len() - 1) as f64;
    let denom = if high_slope.abs() > 0.0 { high_slope.abs() } else { 1.0 };
    if ((high_slope - low_slope) / denom).abs() >= 0.1 {
        return;
    }

    let upper = highs[highs.len() - 1] + high_slope;
    let lower = lows[lows.len() - 1] + low_slope;
    if price > upper {
        push(patterns, 1.0, 0.8, "Channel Breakout (Bullish)");
    } else if price < lower {
        push(patterns, -1.0, 0.8, "Channel Breakout (Bearish)");
    } else {
        push(patterns, 0.0, 0.7, "Within Channel");
    }
}

/// Detect the strongest chart pattern on the latest candles.
///
/// Every candidate that matches is collected; the maximum-strength one wins,
/// first seen on ties. ZigZag-, Donchian-, Fibonacci-Bands- and
/// Envelope-based candidates only run when their families are enabled.
pub fn detect_chart_patterns(candles: &[Candle], config: &IndicatorConfig) -> PatternResult {
    if candles.is_empty() {
        return PatternResult::none();
    }
    let config = config.clamped();
    let closes = closes(candles);
    let highs = highs(candles);
    let lows = lows(candles);
    let volumes = volumes(candles);
    let price = closes[closes.len() - 1];
    let avg_volume = volumes[volumes.len().saturating_sub(10)..].iter().sum::<f64>() / 10.0;

    let support = ta::support_line(&closes, closes.len());
    let resistance = ta::resistance_line(&closes, closes.len());
    if support.is_none() || resistance.is_none() {
        debug!(?support, ?resistance, "level projection unavailable, skipping those candidates");
    }

    let mut patterns: Vec<PatternResult> = Vec::new();
    level_proximity(&mut patterns, price, support, resistance);
    accumulation_zones(
        &mut patterns,
        &highs,
        &lows,
        &volumes,
        price,
        avg_volume,
        support,
        resistance,
    );
    triangles(&mut patterns, &highs, &lows, price, support, resistance);

    if config.donchian.enabled {
        // Band from the window ending one candle back, so the latest close
        // can actually break it.
        let prior = &candles[..candles.len() - 1];
        if let Some((upper, _middle, lower)) =
            ta::donchian(prior, config.donchian.period).last().copied()
        {
            let (signal, pattern) = if price > upper {
                (1.0, "Donchian Breakout (Bullish)")
            } else if price < lower {
                (-1.0, "Donchian Breakout (Bearish)")
            } else {
                (0.0, "Donchian Channel")
            };
            push(&mut patterns, signal, 0.8, pattern);
        }
    }

    if config.fib_bands.enabled {
        if let Some((_upper, _lower, vwma)) =
            ta::fib_bands(candles, config.fib_bands.period, config.fib_bands.multiplier)
                .last()
                .copied()
        {
            let signal = if price > vwma {
                1.0
            } else if price < vwma {
                -1.0
            } else {
                0.0
            };
            push(&mut patterns, signal, 0.8, "Fibonacci Bands");
        }
    }

    if config.envelope.enabled {
        if let Some((upper, _middle, lower)) =
            ta::envelope(&closes, config.envelope.period, config.envelope.deviation)
                .last()
                .copied()
        {
            let signal = if price > upper {
                -1.0
            } else if price < lower {
                1.0
            } else {
                0.0
            };
            push(&mut patterns, signal, 0.75, "Envelope");
        }
    }

    if config.zigzag.enabled {
        let swings = ta::zigzag(candles, config.zigzag.deviation);
        double_extremes(&mut patterns, &swings, price);
        symmetrical_triangle(&mut patterns, &swings, price);
        channel(&mut patterns, &swings, price);
    }

    patterns
        .into_iter()
        .reduce(|best, p| if p.strength > best.strength { p } else { best })
        .unwrap_or_else(PatternResult::none)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{candle, flat};
    use crate::types::DonchianParams;

    #[test]
    fn test_empty_series_is_none() {
        let result = detect_chart_patterns(&[], &IndicatorConfig::default());
        assert_eq!(result.pattern, "None");
    }

    #[test]
    fn test_support_beats_support_zone() {
        // Price equals every close, so it sits exactly on the projected
        // support line: both the 1.5% and the 3% bands match, and the 0.9
        // Support entry wins over the 0.75 Support Zone.
        let candles = flat(30, 100.0);
        let result = detect_chart_patterns(&candles, &IndicatorConfig::default());
        assert_eq!(result.pattern, "Support");
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.9);
    }

    #[test]
    fn test_donchian_breakout_bullish() {
        let mut candles = flat(30, 100.0);
        // Close well above the channel built from the flat window. Raise the
        // close only, keeping lows flat, and push price off the support line.
        candles.push(candle(30, 100.0, 130.0, 100.0, 130.0, 1000.0));
        let config = IndicatorConfig {
            donchian: DonchianParams { enabled: true, ..Default::default() },
            ..Default::default()
        };
        let result = detect_chart_patterns(&candles, &config);
        assert_eq!(result.pattern, "Donchian Breakout (Bullish)");
        assert_eq!(result.signal, 1.0);
    }

    #[test]
    fn test_strongest_pattern_wins() {
        // Flat candles match Support (0.9); with Donchian enabled the
        // in-channel candidate (0.8) also matches but loses.
        let candles = flat(30, 100.0);
        let config = IndicatorConfig {
            donchian: DonchianParams { enabled: true, ..Default::default() },
            ..Default::default()
        };
        let result = detect_chart_patterns(&candles, &config);
        assert_eq!(result.pattern, "Support");
    }
}
