//! Candlestick pattern detection over the last five candles.

use crate::signals::ta;
use crate::types::{Candle, IndicatorConfig, PatternResult};

/// Which fractal mark, if any, confirms a rule and boosts its strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    Bullish,
    Bearish,
    None,
}

/// Geometry of the last five candles plus trend context.
///
/// Field prefixes count back from the latest candle: `p` previous, `pp` two
/// back, `ppp` three back, `pp2` four back.
struct Shape {
    o: f64,
    h: f64,
    l: f64,
    c: f64,
    po: f64,
    ph: f64,
    pl: f64,
    pc: f64,
    ppo: f64,
    pph: f64,
    ppl: f64,
    ppc: f64,
    pppo: f64,
    pppc: f64,
    pp2c: f64,
    body: f64,
    range: f64,
    prev_body: f64,
    prev2_body: f64,
    uptrend: bool,
    downtrend: bool,
}

impl Shape {
    fn upper_shadow(&self) -> f64 {
        self.h - self.o.max(self.c)
    }

    fn lower_shadow(&self) -> f64 {
        self.o.min(self.c) - self.l
    }
}

/// One row of the priority table. Declaration order is the precedence rule.
struct Rule {
    name: &'static str,
    base_strength: f64,
    confirm: Confirm,
    signal: fn(&Shape) -> f64,
    matches: fn(&Shape) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        name: "Bullish Marubozu",
        base_strength: 0.95,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| s.body > s.range * 0.95 && s.o == s.l && s.c == s.h && s.c > s.o,
    },
    Rule {
        name: "Bearish Marubozu",
        base_strength: 0.95,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| s.body > s.range * 0.95 && s.o == s.h && s.c == s.l && s.c < s.o,
    },
    Rule {
        name: "Bullish Engulfing",
        base_strength: 0.95,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.pc < s.po && s.c > s.o && s.o <= s.pl && s.c >= s.ph && s.body > s.prev_body
        },
    },
    Rule {
        name: "Bearish Engulfing",
        base_strength: 0.95,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.pc > s.po && s.c < s.o && s.o >= s.ph && s.c <= s.pl && s.body > s.prev_body
        },
    },
    Rule {
        name: "Three White Soldiers",
        base_strength: 0.9,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.c > s.o
                && s.pc > s.po
                && s.ppc > s.ppo
                && s.c > s.pc
                && s.pc > s.ppc
                && s.body > s.range * 0.4
                && s.prev_body > (s.ph - s.pl) * 0.4
                && s.prev2_body > (s.pph - s.ppl) * 0.4
                && s.downtrend
        },
    },
    Rule {
        name: "Three Black Crows",
        base_strength: 0.9,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.c < s.o
                && s.pc < s.po
                && s.ppc < s.ppo
                && s.c < s.pc
                && s.pc < s.ppc
                && s.body > s.range * 0.4
                && s.prev_body > (s.ph - s.pl) * 0.4
                && s.prev2_body > (s.pph - s.ppl) * 0.4
                && s.uptrend
        },
    },
    Rule {
        name: "Head and Shoulders",
        base_strength: 0.9,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.ppo > s.pppo
                && s.ppc < s.pppo
                && s.pc > s.po
                && s.pc > s.ppo
                && s.pc > s.pp2c
                && s.c < s.o
                && s.c < s.ppc
                && (s.c - s.pppc).abs() < s.range * 0.1
                && (s.ppc - s.pp2c).abs() < s.range * 0.2
        },
    },
    Rule {
        name: "Inverted Head and Shoulders",
        base_strength: 0.9,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.ppo < s.pppo
                && s.ppc > s.pppo
                && s.pc < s.po
                && s.pc < s.ppo
                && s.pc < s.pp2c
                && s.c > s.o
                && s.c > s.ppc
                && (s.c - s.pppc).abs() < s.range * 0.1
                && (s.ppc - s.pp2c).abs() < s.range * 0.2
        },
    },
    Rule {
        name: "Morning Star",
        base_strength: 0.9,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.ppc < s.ppo
                && (s.po - s.pc).abs() < (s.ph - s.pl) * 0.1
                && s.c > s.o
                && s.c > (s.ppo + s.ppc) / 2.0
        },
    },
    Rule {
        name: "Evening Star",
        base_strength: 0.9,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.ppc > s.ppo
                && (s.po - s.pc).abs() < (s.ph - s.pl) * 0.1
                && s.c < s.o
                && s.c < (s.ppo + s.ppc) / 2.0
        },
    },
    Rule {
        name: "Hammer",
        base_strength: 0.85,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.body < s.range * 0.3
                && s.lower_shadow() > s.body * 2.0
                && s.o.max(s.c) < s.h * 1.1
                && s.downtrend
        },
    },
    Rule {
        name: "Hanging Man",
        base_strength: 0.85,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.body < s.range * 0.3
                && s.lower_shadow() > s.body * 2.0
                && s.o.max(s.c) < s.h * 1.1
                && s.uptrend
        },
    },
    Rule {
        name: "Shooting Star",
        base_strength: 0.85,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.body < s.range * 0.3
                && s.upper_shadow() > s.body * 2.0
                && s.o.min(s.c) > s.l * 0.9
                && s.uptrend
        },
    },
    Rule {
        name: "Dragonfly Doji",
        base_strength: 0.8,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.body < s.range * 0.05
                && s.o >= s.h * 0.99
                && s.c >= s.h * 0.99
                && s.range > 0.0
                && s.downtrend
        },
    },
    Rule {
        name: "Gravestone Doji",
        base_strength: 0.8,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.body < s.range * 0.05
                && s.o <= s.l * 1.01
                && s.c <= s.l * 1.01
                && s.range > 0.0
                && s.uptrend
        },
    },
    Rule {
        name: "Bullish Harami",
        base_strength: 0.85,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.pc < s.po
                && s.c > s.o
                && s.o > s.pc
                && s.c < s.po
                && s.body < s.prev_body * 0.6
                && s.downtrend
        },
    },
    Rule {
        name: "Bearish Harami",
        base_strength: 0.85,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.pc > s.po
                && s.c < s.o
                && s.o < s.pc
                && s.c > s.po
                && s.body < s.prev_body * 0.6
                && s.uptrend
        },
    },
    Rule {
        name: "Spinning Top",
        base_strength: 0.7,
        confirm: Confirm::None,
        signal: |s| if s.uptrend { -0.5 } else { 0.5 },
        matches: |s| {
            s.body < s.range * 0.3 && s.upper_shadow() > s.body && s.lower_shadow() > s.body
        },
    },
    Rule {
        name: "Doji",
        base_strength: 0.7,
        confirm: Confirm::None,
        signal: |s| if s.pc > s.po { -0.5 } else { 0.5 },
        matches: |s| s.body < s.range * 0.1,
    },
    Rule {
        name: "Tweezer Top",
        base_strength: 0.85,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            (s.h - s.ph).abs() / s.h < 0.001 && s.uptrend && s.c < s.o && s.pc > s.po
        },
    },
    Rule {
        name: "Tweezer Bottom",
        base_strength: 0.85,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            (s.l - s.pl).abs() / s.l < 0.001 && s.downtrend && s.c > s.o && s.pc < s.po
        },
    },
    Rule {
        name: "Inside Bar",
        base_strength: 0.8,
        confirm: Confirm::None,
        signal: |s| if s.c > s.o { 0.5 } else { -0.5 },
        matches: |s| s.h < s.ph && s.l > s.pl && s.body < s.prev_body,
    },
    Rule {
        name: "Outside Bar",
        base_strength: 0.85,
        confirm: Confirm::None,
        signal: |s| if s.c > s.o { 1.0 } else { -1.0 },
        matches: |s| s.h > s.ph && s.l < s.pl && s.body > s.prev_body,
    },
    Rule {
        name: "Three Inside Up",
        base_strength: 0.9,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.downtrend
                && s.ppc < s.ppo
                && s.pc > s.po
                && s.pc < s.ppo
                && s.po > s.ppc
                && s.c > s.o
                && s.c > s.ppo
        },
    },
    Rule {
        name: "Three Inside Down",
        base_strength: 0.9,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.uptrend
                && s.ppc > s.ppo
                && s.pc < s.po
                && s.pc > s.ppo
                && s.po < s.ppc
                && s.c < s.o
                && s.c < s.ppo
        },
    },
    Rule {
        name: "Bullish Kicker",
        base_strength: 0.95,
        confirm: Confirm::Bullish,
        signal: |_| 1.0,
        matches: |s| {
            s.downtrend && s.pc < s.po && s.o > s.pc && s.c > s.o && s.body > s.prev_body
        },
    },
    Rule {
        name: "Bearish Kicker",
        base_strength: 0.95,
        confirm: Confirm::Bearish,
        signal: |_| -1.0,
        matches: |s| {
            s.uptrend && s.pc > s.po && s.o < s.pc && s.c < s.o && s.body > s.prev_body
        },
    },
];

fn shape(source: &[Candle], raw: &[Candle]) -> Shape {
    let n = source.len();
    let at = |back: usize| -> &Candle {
        // Missing history falls back to the nearest older candle we do have.
        let idx = n.saturating_sub(back + 1).min(n - 1);
        &source[idx]
    };
    let (last, prev, prev2, prev3, prev4) = (at(0), at(1), at(2), at(3), at(4));

    // Trend context always comes from the raw closes, even when patterns run
    // over Heikin-Ashi candles.
    let rn = raw.len();
    let trend = &raw[rn.saturating_sub(6)..rn - 1];
    let uptrend = trend.windows(2).all(|w| w[1].close > w[0].close);
    let downtrend = trend.windows(2).all(|w| w[1].close < w[0].close);

    Shape {
        o: last.open,
        h: last.high,
        l: last.low,
        c: last.close,
        po: prev.open,
        ph: prev.high,
        pl: prev.low,
        pc: prev.close,
        ppo: prev2.open,
        pph: prev2.high,
        ppl: prev2.low,
        ppc: prev2.close,
        pppo: prev3.open,
        pppc: prev3.close,
        pp2c: prev4.close,
        body: (last.close - last.open).abs(),
        range: last.high - last.low,
        prev_body: (prev.close - prev.open).abs(),
        prev2_body: (prev2.close - prev2.open).abs(),
        uptrend,
        downtrend,
    }
}

/// Detect the highest-priority candlestick pattern on the latest candles.
///
/// Patterns are matched over Heikin-Ashi candles when that transform is
/// enabled; an enabled fractal filter boosts a confirmed reversal's strength
/// by 1.1x and tags the pattern name.
pub fn detect_candlestick_patterns(candles: &[Candle], config: &IndicatorConfig) -> PatternResult {
    if candles.is_empty() {
        return PatternResult::none();
    }

    let ha;
    let source: &[Candle] = if config.heikin_ashi.enabled {
        ha = ta::heikin_ashi(candles);
        &ha
    } else {
        candles
    };
    let (bearish_fractal, bullish_fractal) = if config.fractals.enabled {
        ta::latest_fractal(&ta::fractals(candles), 5)
    } else {
        (None, None)
    };

    let shape = shape(source, candles);
    for rule in RULES {
        if !(rule.matches)(&shape) {
            continue;
        }
        let confirmed = match rule.confirm {
            Confirm::Bullish => bullish_fractal.is_some(),
            Confirm::Bearish => bearish_fractal.is_some(),
            Confirm::None => false,
        };
        let (strength, pattern) = if confirmed {
            (rule.base_strength * 1.1, format!("{} (Fractal Confirmed)", rule.name))
        } else {
            (rule.base_strength, rule.name.to_string())
        };
        return PatternResult { signal: (rule.signal)(&shape), strength, pattern };
    }
    PatternResult::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::candle;

    fn no_patterns_config() -> IndicatorConfig {
        IndicatorConfig::default()
    }

    /// Five candles in a strict downtrend followed by the given final candle.
    fn after_downtrend(last: Candle) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..5)
            .map(|i| {
                let base = 120.0 - i as f64 * 4.0;
                candle(i, base, base + 1.0, base - 5.0, base - 4.0, 1000.0)
            })
            .collect();
        candles.push(last);
        candles
    }

    #[test]
    fn test_bullish_marubozu_wins_over_doji_range() {
        // Full-body candle: open at the low, close at the high.
        let candles = after_downtrend(candle(5, 100.0, 110.0, 100.0, 110.0, 1000.0));
        let result = detect_candlestick_patterns(&candles, &no_patterns_config());
        assert_eq!(result.pattern, "Bullish Marubozu");
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.95);
    }

    #[test]
    fn test_spinning_top_outranks_doji() {
        // Alternating closes so no trend-gated rule fires first.
        let mut candles: Vec<Candle> = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    candle(i, 100.0, 101.0, 99.5, 100.5, 1000.0)
                } else {
                    candle(i, 100.5, 101.0, 99.5, 100.0, 1000.0)
                }
            })
            .collect();
        // Tiny body with long shadows on both sides matches Spinning Top and
        // Doji; the earlier-declared Spinning Top wins.
        candles.push(candle(5, 100.0, 105.0, 95.0, 100.2, 1000.0));
        let result = detect_candlestick_patterns(&candles, &no_patterns_config());
        assert_eq!(result.pattern, "Spinning Top");
        assert_eq!(result.signal, 0.5);
        assert_eq!(result.strength, 0.7);
    }

    #[test]
    fn test_hammer_requires_downtrend() {
        // Small body at the top, long lower shadow.
        let hammer = candle(5, 100.0, 101.0, 94.0, 100.8, 1000.0);
        let result = detect_candlestick_patterns(&after_downtrend(hammer), &no_patterns_config());
        assert_eq!(result.pattern, "Hammer");
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.85);
    }

    #[test]
    fn test_bullish_engulfing() {
        let mut candles: Vec<Candle> = (0..4)
            .map(|i| {
                let base = 110.0 + (i % 2) as f64;
                candle(i, base, base + 2.0, base - 2.0, base + 0.5, 1000.0)
            })
            .collect();
        // Previous: red candle 104 -> 102. Last: green candle engulfing it.
        candles.push(candle(4, 104.0, 104.5, 101.5, 102.0, 1000.0));
        candles.push(candle(5, 101.0, 106.0, 100.5, 105.5, 1000.0));
        let result = detect_candlestick_patterns(&candles, &no_patterns_config());
        assert_eq!(result.pattern, "Bullish Engulfing");
        assert_eq!(result.strength, 0.95);
    }

    #[test]
    fn test_no_pattern_on_plain_candles() {
        let candles: Vec<Candle> = (0..6)
            .map(|i| {
                let base = 100.0 + (i % 3) as f64;
                candle(i, base, base + 1.2, base - 0.2, base + 1.0, 1000.0)
            })
            .collect();
        let result = detect_candlestick_patterns(&candles, &no_patterns_config());
        assert_eq!(result.pattern, "None");
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.0);
    }

    #[test]
    fn test_fractal_confirmation_boosts_strength() {
        // Downtrend with a confirmed low fractal three candles back, ending
        // in a hammer.
        let mut candles: Vec<Candle> = (0..7)
            .map(|i| {
                let base = 130.0 - i as f64 * 4.0;
                candle(i, base, base + 1.0, base - 5.0, base - 4.0, 1000.0)
            })
            .collect();
        let n = candles.len();
        // Deep spike low to form the fractal.
        candles[n - 3].low = 60.0;
        candles.push(candle(7, 94.0, 95.0, 88.0, 94.8, 1000.0));

        let config = IndicatorConfig {
            fractals: crate::types::Toggle::on(),
            ..Default::default()
        };
        let result = detect_candlestick_patterns(&candles, &config);
        assert!(result.pattern.contains("(Fractal Confirmed)"), "got {}", result.pattern);
        assert!((result.strength - 0.85 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_is_none() {
        let result = detect_candlestick_patterns(&[], &no_patterns_config());
        assert_eq!(result.pattern, "None");
    }
}
