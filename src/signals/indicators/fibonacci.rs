//! Fibonacci retracement.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, FibParams, IndicatorResult};

/// Retracement proximity check over the trailing window. The first level
/// (23.6/38.2/50/61.8%) within 1.5% of price decides: price at or above the
/// level votes +1, below votes -1. The 38.2% and 61.8% levels weigh 0.85,
/// the others 0.7. No nearby level abstains entirely.
pub struct Fibonacci {
    period: usize,
}

impl Fibonacci {
    pub fn new(params: FibParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Fibonacci {
    fn name(&self) -> &'static str {
        "Fibonacci Retracement"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let levels = ta::fib_levels(candles, self.period)
            .ok_or_else(|| IndicatorError::Computation("empty fib window".to_string()))?;
        let price = require_finite(self.name(), candles[candles.len() - 1].close)?;

        let (mut signal, mut strength) = (0.0, 0.0);
        for (i, level) in levels.iter().enumerate() {
            if (price - level).abs() / price < 0.015 {
                signal = if price >= *level { 1.0 } else { -1.0 };
                strength = if i == 1 || i == 3 { 0.85 } else { 0.7 };
                break;
            }
        }
        let zone = if signal > 0.0 {
            "Near Support"
        } else if signal < 0.0 {
            "Near Resistance"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!("Fibonacci Retracement: {price:.2} ({zone})"),
        })
    }
}
