//! Average True Range.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{AtrParams, Candle, IndicatorResult};

/// Volatility gauge: always votes 0, but its strength classifies the latest
/// ATR against the mean and population standard deviation of the last ten
/// readings (0.8 high, 0.4 low, 0.6 normal).
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(params: AtrParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &'static str {
        "ATR"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::atr(candles, self.period);
        let latest = require_finite(self.name(), values.last().copied().unwrap_or(f64::NAN))?;

        let price = candles[candles.len() - 1].close;
        let percent = latest / price * 100.0;

        let history = &values[values.len().saturating_sub(10)..];
        let mean = history.iter().sum::<f64>() / history.len() as f64;
        let std =
            (history.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / history.len() as f64).sqrt();

        let (strength, regime) = if latest > mean + std {
            (0.8, "High Volatility")
        } else if latest < mean - std {
            (0.4, "Low Volatility")
        } else {
            (0.6, "Normal Volatility")
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal: 0.0,
            strength,
            display: format!("ATR: {latest:.2} ({percent:.2}% of price, {regime})"),
        })
    }
}
