//! Aroon oscillator.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, AroonParams, Candle, IndicatorResult};

/// Aroon up/down/oscillator. A dominant side at or above 70 with a matching
/// oscillator sign is a full vote, stronger when the oscillator clears 50;
/// mere dominance is a half vote at 0.6.
pub struct Aroon {
    period: usize,
}

impl Aroon {
    pub fn new(params: AroonParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Aroon {
    fn name(&self) -> &'static str {
        "Aroon"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let closes = closes(candles);
        let up = require_finite(
            self.name(),
            ta::aroon_up(&closes, self.period).last().copied().unwrap_or(f64::NAN),
        )?;
        let down = require_finite(
            self.name(),
            ta::aroon_down(&closes, self.period).last().copied().unwrap_or(f64::NAN),
        )?;
        let osc = up - down;

        let (mut signal, mut strength) = (0.0, 0.6);
        if up > down && up >= 70.0 && osc > 0.0 {
            signal = 1.0;
            strength = if osc > 50.0 { 0.9 } else { 0.7 };
        } else if down > up && down >= 70.0 && osc < 0.0 {
            signal = -1.0;
            strength = if osc < -50.0 { 0.9 } else { 0.7 };
        } else if up > down {
            signal = 0.5;
        } else if down > up {
            signal = -0.5;
        }
        let direction = if signal > 0.0 {
            "Bullish"
        } else if signal < 0.0 {
            "Bearish"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!(
                "Aroon: Up={up:.2}, Down={down:.2}, Osc={osc:.2} ({direction})"
            ),
        })
    }
}
