//! EMA crossover.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, Candle, EmaParams, IndicatorResult};

/// Short/long EMA crossover. A fresh cross (the relation flipped on the
/// latest candle) is a full vote at 0.9; an established relation is a half
/// vote at 0.6.
pub struct EmaCross {
    short: usize,
    long: usize,
}

impl EmaCross {
    pub fn new(params: EmaParams) -> Self {
        Self { short: params.short, long: params.long }
    }
}

impl Indicator for EmaCross {
    fn name(&self) -> &'static str {
        "EMA"
    }

    fn min_periods(&self) -> usize {
        self.long
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let closes = closes(candles);
        let short = ta::ema(&closes, self.short);
        let long = ta::ema(&closes, self.long);

        let short_latest =
            require_finite(self.name(), short.last().copied().unwrap_or(f64::NAN))?;
        let long_latest = require_finite(self.name(), long.last().copied().unwrap_or(f64::NAN))?;
        // With a single point the previous value defaults to the latest, so
        // no cross can be detected.
        let prev_short = short.len().checked_sub(2).map_or(short_latest, |i| short[i]);
        let prev_long = long.len().checked_sub(2).map_or(long_latest, |i| long[i]);

        let signal = if short_latest > long_latest && prev_short <= prev_long {
            1.0
        } else if short_latest < long_latest && prev_short >= prev_long {
            -1.0
        } else if short_latest > long_latest {
            0.5
        } else if short_latest < long_latest {
            -0.5
        } else {
            0.0
        };
        let state = if signal == 1.0 {
            "Bullish Crossover"
        } else if signal == -1.0 {
            "Bearish Crossover"
        } else if signal > 0.0 {
            "Bullish"
        } else {
            "Bearish"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal.abs() == 1.0 { 0.9 } else { 0.6 },
            display: format!("EMA: {short_latest:.2}/{long_latest:.2} ({state})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, uptrend};

    #[test]
    fn test_established_uptrend_is_half_vote() {
        let ema = EmaCross::new(EmaParams::default());
        let result = ema.evaluate(&uptrend(80)).unwrap();
        assert_eq!(result.signal, 0.5);
        assert_eq!(result.strength, 0.6);
    }

    #[test]
    fn test_established_downtrend_is_half_vote() {
        let ema = EmaCross::new(EmaParams::default());
        let result = ema.evaluate(&downtrend(80)).unwrap();
        assert_eq!(result.signal, -0.5);
    }

    #[test]
    fn test_fresh_cross_is_full_vote() {
        // Long decline, then a sharp rally so the short EMA crosses the long
        // on the final candle.
        let mut candles = downtrend(60);
        let start = candles.len();
        for i in 0..12 {
            let base = candles.last().unwrap().close + 8.0;
            candles.push(crate::signals::indicators::testutil::candle(
                start + i,
                base,
                base + 2.0,
                base - 1.0,
                base + 1.0,
                1000.0,
            ));
        }
        let ema = EmaCross::new(EmaParams::default());
        let result = ema.evaluate(&candles).unwrap();
        assert!(result.signal > 0.0, "expected bullish, got {}", result.signal);
    }
}
