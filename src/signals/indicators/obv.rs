//! On-balance volume.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, candle::volumes, Candle, IndicatorResult};

/// OBV slope: rising votes +1 at 0.8, falling -1 at 0.8, unchanged abstains
/// at 0.5.
#[derive(Default)]
pub struct Obv;

impl Indicator for Obv {
    fn name(&self) -> &'static str {
        "OBV"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::obv(&closes(candles), &volumes(candles));
        let latest = require_finite(self.name(), values[values.len() - 1])?;
        let prev = values.len().checked_sub(2).map_or(latest, |i| values[i]);

        let signal = if latest > prev {
            1.0
        } else if latest < prev {
            -1.0
        } else {
            0.0
        };
        let state = if signal > 0.0 {
            "Rising (Bullish)"
        } else if signal < 0.0 {
            "Falling (Bearish)"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal != 0.0 { 0.8 } else { 0.5 },
            display: format!("OBV: {latest:.2} ({state})"),
        })
    }
}
