//! Moving Average Convergence Divergence.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, Candle, IndicatorResult, MacdParams};

/// MACD histogram (line minus signal line). The sign gives the vote, the
/// magnitude picks 0.9 over 0.6 past an absolute 0.5.
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(params: MacdParams) -> Self {
        Self { fast: params.fast, slow: params.slow, signal: params.signal }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &'static str {
        "MACD"
    }

    fn min_periods(&self) -> usize {
        self.slow + self.signal - 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let closes = closes(candles);
        let line = ta::macd_line(&closes, self.fast, self.slow);
        let signal_line = ta::macd_signal(&closes, self.fast, self.slow, self.signal);
        let histogram = match (line.last(), signal_line.last()) {
            (Some(l), Some(s)) => l - s,
            _ => f64::NAN,
        };
        let histogram = require_finite(self.name(), histogram)?;

        let signal = if histogram > 0.0 {
            1.0
        } else if histogram < 0.0 {
            -1.0
        } else {
            0.0
        };
        let direction = if histogram > 0.0 {
            "Bullish"
        } else if histogram < 0.0 {
            "Bearish"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if histogram.abs() > 0.5 { 0.9 } else { 0.6 },
            display: format!("MACD: {histogram:.2} ({direction})"),
        })
    }
}
