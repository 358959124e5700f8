//! Stochastic oscillator.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult, StochasticParams};

/// Smoothed %K scored against the 20/80 bands, same shape as the RSI table.
pub struct Stochastic {
    k: usize,
    d: usize,
    smooth: usize,
}

impl Stochastic {
    pub fn new(params: StochasticParams) -> Self {
        Self { k: params.k, d: params.d, smooth: params.smooth }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &'static str {
        "Stochastic"
    }

    fn min_periods(&self) -> usize {
        self.k + self.smooth - 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let (k, _d) = ta::stochastic(candles, self.k, self.d, self.smooth);
        let latest = require_finite(self.name(), k.last().copied().unwrap_or(f64::NAN))?;

        let (signal, strength, zone) = if latest > 80.0 {
            (-1.0, 0.9, "Overbought")
        } else if latest < 20.0 {
            (1.0, 0.9, "Oversold")
        } else if latest > 50.0 {
            (0.5, 0.6, "Bullish")
        } else {
            (-0.5, 0.6, "Bearish")
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!("Stochastic: {latest:.2} ({zone})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, flat, uptrend};

    #[test]
    fn test_uptrend_is_overbought() {
        let stoch = Stochastic::new(StochasticParams::default());
        let result = stoch.evaluate(&uptrend(50)).unwrap();
        assert_eq!(result.signal, -1.0);
        assert_eq!(result.strength, 0.9);
    }

    #[test]
    fn test_downtrend_is_oversold() {
        let stoch = Stochastic::new(StochasticParams::default());
        let result = stoch.evaluate(&downtrend(50)).unwrap();
        assert_eq!(result.signal, 1.0);
    }

    #[test]
    fn test_flat_window_is_an_error() {
        // Zero high-low range leaves %K undefined.
        let stoch = Stochastic::new(StochasticParams::default());
        assert!(stoch.evaluate(&flat(50, 100.0)).is_err());
    }
}
