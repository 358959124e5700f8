//! Relative Strength Index.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, Candle, IndicatorResult, RsiParams};

/// Wilder-smoothed RSI scored against the classic 30/70 bands.
///
/// Overbought (>70) votes -1 at 0.9, oversold (<30) votes +1 at 0.9; inside
/// the bands the side of 50 gives a half vote at 0.6.
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(params: RsiParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &'static str {
        "RSI"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::rsi(&closes(candles), self.period);
        let latest = require_finite(self.name(), values.last().copied().unwrap_or(f64::NAN))?;

        let (signal, strength, zone) = if latest > 70.0 {
            (-1.0, 0.9, "Overbought")
        } else if latest < 30.0 {
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
            display: format!("RSI: {latest:.2} ({zone})"),
        })
    }
}
