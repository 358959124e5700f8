//! Chaikin oscillator.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, ChaikinParams, IndicatorResult};

/// Fast/slow EMA spread of the accumulation/distribution line. The sign
/// gives the vote; magnitude past an absolute 0.5 picks 0.9 over 0.6.
pub struct Chaikin {
    fast: usize,
    slow: usize,
}

impl Chaikin {
    pub fn new(params: ChaikinParams) -> Self {
        Self { fast: params.fast, slow: params.slow }
    }
}

impl Indicator for Chaikin {
    fn name(&self) -> &'static str {
        "Chaikin Oscillator"
    }

    fn min_periods(&self) -> usize {
        self.slow.max(self.fast)
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::chaikin_osc(candles, self.fast, self.slow);
        let latest = require_finite(self.name(), values.last().copied().unwrap_or(f64::NAN))?;

        let signal = if latest > 0.0 {
            1.0
        } else if latest < 0.0 {
            -1.0
        } else {
            0.0
        };
        let direction = if latest > 0.0 {
            "Bullish"
        } else if latest < 0.0 {
            "Bearish"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if latest.abs() > 0.5 { 0.9 } else { 0.6 },
            display: format!("Chaikin Oscillator: {latest:.2} ({direction})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{candle, flat};

    #[test]
    fn test_accumulation_is_bullish() {
        // Closes pinned near the high push the A/D line, and its fast EMA,
        // upward.
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64;
                candle(i, base, base + 2.0, base - 2.0, base + 1.9, 1000.0)
            })
            .collect();
        let chaikin = Chaikin::new(ChaikinParams::default());
        let result = chaikin.evaluate(&candles).unwrap();
        assert_eq!(result.signal, 1.0);
    }

    #[test]
    fn test_distribution_is_bearish() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| {
                let base = 200.0 - i as f64;
                candle(i, base, base + 2.0, base - 2.0, base - 1.9, 1000.0)
            })
            .collect();
        let chaikin = Chaikin::new(ChaikinParams::default());
        let result = chaikin.evaluate(&candles).unwrap();
        assert_eq!(result.signal, -1.0);
    }

    #[test]
    fn test_zero_flow_is_neutral() {
        let chaikin = Chaikin::new(ChaikinParams::default());
        let result = chaikin.evaluate(&flat(30, 100.0)).unwrap();
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.6);
    }
}
