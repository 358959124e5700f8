//! Parabolic SAR.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult, PsarParams};

/// SAR below the close votes +1, above votes -1, always at 0.8.
pub struct Psar {
    step: f64,
    max: f64,
}

impl Psar {
    pub fn new(params: PsarParams) -> Self {
        Self { step: params.step, max: params.max }
    }
}

impl Indicator for Psar {
    fn name(&self) -> &'static str {
        "PSAR"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::psar(candles, self.step, self.max);
        let latest = require_finite(self.name(), values.last().copied().unwrap_or(f64::NAN))?;

        let bullish = latest < candles[candles.len() - 1].close;
        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal: if bullish { 1.0 } else { -1.0 },
            strength: 0.8,
            display: format!(
                "PSAR: {latest:.2} ({})",
                if bullish { "Below Price (Bullish)" } else { "Above Price (Bearish)" }
            ),
        })
    }
}
