//! Ichimoku cloud.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, IchimokuParams, IndicatorResult};

/// Cloud position check: price above both undisplaced spans with tenkan over
/// kijun votes +1 at 0.8, the full mirror votes -1, anything mixed abstains
/// at 0.5.
pub struct Ichimoku {
    tenkan: usize,
    kijun: usize,
    senkou: usize,
}

impl Ichimoku {
    pub fn new(params: IchimokuParams) -> Self {
        Self { tenkan: params.tenkan, kijun: params.kijun, senkou: params.senkou }
    }
}

impl Indicator for Ichimoku {
    fn name(&self) -> &'static str {
        "Ichimoku"
    }

    fn min_periods(&self) -> usize {
        self.tenkan.max(self.kijun).max(self.senkou)
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let lines = ta::ichimoku(candles, self.tenkan, self.kijun, self.senkou);
        let (tenkan, kijun, senkou_a, senkou_b) = lines
            .last()
            .copied()
            .ok_or_else(|| IndicatorError::Computation("empty ichimoku series".to_string()))?;
        let price = require_finite(self.name(), candles[candles.len() - 1].close)?;

        let signal = if price > senkou_a && price > senkou_b && tenkan > kijun {
            1.0
        } else if price < senkou_a && price < senkou_b && tenkan < kijun {
            -1.0
        } else {
            0.0
        };
        let state = if signal > 0.0 {
            "Above Cloud (Bullish)"
        } else if signal < 0.0 {
            "Below Cloud (Bearish)"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal != 0.0 { 0.8 } else { 0.5 },
            display: format!("Ichimoku: {state}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, flat, uptrend};

    #[test]
    fn test_uptrend_is_above_cloud() {
        let ichimoku = Ichimoku::new(IchimokuParams::default());
        let result = ichimoku.evaluate(&uptrend(80)).unwrap();
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.8);
    }

    #[test]
    fn test_downtrend_is_below_cloud() {
        let ichimoku = Ichimoku::new(IchimokuParams::default());
        let result = ichimoku.evaluate(&downtrend(80)).unwrap();
        assert_eq!(result.signal, -1.0);
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let ichimoku = Ichimoku::new(IchimokuParams::default());
        let result = ichimoku.evaluate(&flat(80, 100.0)).unwrap();
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.5);
    }
}
