//! Bill Williams fractals.

use crate::error::IndicatorError;
use crate::signals::{require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult};

/// Most recent confirmed fractal within the last five candles. A bullish low
/// fractal votes +1 at 0.85, a bearish high fractal -1 at 0.85; with neither
/// it abstains entirely.
#[derive(Default)]
pub struct Fractals;

impl Indicator for Fractals {
    fn name(&self) -> &'static str {
        "Fractals"
    }

    fn min_periods(&self) -> usize {
        5
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let marks = ta::fractals(candles);
        let (bearish, bullish) = ta::latest_fractal(&marks, 5);

        let (signal, strength, state) = if bullish.is_some() {
            (1.0, 0.85, "Bullish Reversal")
        } else if bearish.is_some() {
            (-1.0, 0.85, "Bearish Reversal")
        } else {
            (0.0, 0.0, "No Signal")
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!("Fractals: {state}"),
        })
    }
}
