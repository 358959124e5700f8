//! Price / moving-average crossover.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, Candle, IndicatorResult, MaParams};

/// Close versus SMA. Same vote shape as the EMA crossover, but the close
/// series itself plays the fast side.
pub struct MaCross {
    period: usize,
}

impl MaCross {
    pub fn new(params: MaParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for MaCross {
    fn name(&self) -> &'static str {
        "MA"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let closes = closes(candles);
        let ma = ta::sma(&closes, self.period);

        let ma_latest = require_finite(self.name(), ma.last().copied().unwrap_or(f64::NAN))?;
        let ma_prev = ma.len().checked_sub(2).map_or(ma_latest, |i| ma[i]);
        let close = closes[closes.len() - 1];
        let prev_close = closes.len().checked_sub(2).map_or(close, |i| closes[i]);

        let signal = if close > ma_latest && prev_close <= ma_prev {
            1.0
        } else if close < ma_latest && prev_close >= ma_prev {
            -1.0
        } else if close > ma_latest {
            0.5
        } else if close < ma_latest {
            -0.5
        } else {
            0.0
        };
        let state = if signal == 1.0 {
            "Bullish Crossover"
        } else if signal == -1.0 {
            "Bearish Crossover"
        } else if signal > 0.0 {
            "Above MA (Bullish)"
        } else {
            "Below MA (Bearish)"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal.abs() == 1.0 { 0.9 } else { 0.6 },
            display: format!("MA: {ma_latest:.2} ({state})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, uptrend};

    #[test]
    fn test_uptrend_close_above_ma() {
        let ma = MaCross::new(MaParams::default());
        let result = ma.evaluate(&uptrend(50)).unwrap();
        assert!(result.signal > 0.0);
        assert!(result.display.contains("Bullish"));
    }

    #[test]
    fn test_downtrend_close_below_ma() {
        let ma = MaCross::new(MaParams::default());
        let result = ma.evaluate(&downtrend(50)).unwrap();
        assert!(result.signal < 0.0);
    }
}
