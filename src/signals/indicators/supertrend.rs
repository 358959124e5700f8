//! Supertrend.

use crate::error::IndicatorError;
use crate::signals::{require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult, SupertrendParams};

/// Supertrend direction: bullish votes +1, bearish -1, always at 0.85.
pub struct Supertrend {
    period: usize,
    multiplier: f64,
}

impl Supertrend {
    pub fn new(params: SupertrendParams) -> Self {
        Self { period: params.period, multiplier: params.multiplier }
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &'static str {
        "Supertrend"
    }

    fn min_periods(&self) -> usize {
        self.period + 2
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::supertrend(candles, self.period, self.multiplier);
        let (_, direction) = values
            .last()
            .copied()
            .ok_or_else(|| IndicatorError::Computation("empty supertrend series".to_string()))?;

        let bullish = direction == 1;
        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal: if bullish { 1.0 } else { -1.0 },
            strength: 0.85,
            display: format!("Supertrend: {}", if bullish { "Bullish" } else { "Bearish" }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, uptrend};

    #[test]
    fn test_uptrend_is_bullish() {
        let st = Supertrend::new(SupertrendParams::default());
        let result = st.evaluate(&uptrend(50)).unwrap();
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.85);
    }

    #[test]
    fn test_downtrend_is_bearish() {
        let st = Supertrend::new(SupertrendParams::default());
        let result = st.evaluate(&downtrend(50)).unwrap();
        assert_eq!(result.signal, -1.0);
    }
}
