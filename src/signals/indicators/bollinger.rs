//! Bollinger Bands.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{candle::closes, Candle, BollingerParams, IndicatorResult};

/// Band breach detector: a close above the upper band votes -1 at 0.9, below
/// the lower band +1 at 0.9. Inside the bands it abstains entirely.
pub struct Bollinger {
    period: usize,
    deviation: f64,
}

impl Bollinger {
    pub fn new(params: BollingerParams) -> Self {
        Self { period: params.period, deviation: params.deviation }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &'static str {
        "Bollinger Bands"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let closes = closes(candles);
        let bands = ta::bollinger(&closes, self.period, self.deviation);
        let (upper, _middle, lower) = bands
            .last()
            .copied()
            .ok_or_else(|| IndicatorError::Computation("empty band series".to_string()))?;
        require_finite(self.name(), upper)?;
        require_finite(self.name(), lower)?;

        let close = closes[closes.len() - 1];
        let (signal, strength, zone) = if close > upper {
            (-1.0, 0.9, "Above Upper")
        } else if close < lower {
            (1.0, 0.9, "Below Lower")
        } else {
            (0.0, 0.0, "Within Bands")
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!("Bollinger Bands: {close:.2} ({zone})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{candle, flat};

    #[test]
    fn test_within_bands_abstains() {
        let bb = Bollinger::new(BollingerParams::default());
        // Alternate closes around 100 so the bands have width.
        let candles: Vec<_> = (0..40)
            .map(|i| {
                let c = if i % 2 == 0 { 99.0 } else { 101.0 };
                candle(i, 100.0, 102.0, 98.0, c, 1000.0)
            })
            .collect();
        let result = bb.evaluate(&candles).unwrap();
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.0);
    }

    #[test]
    fn test_breakout_above_upper_is_bearish() {
        let mut candles = flat(40, 100.0);
        candles.push(candle(40, 100.0, 121.0, 100.0, 120.0, 1000.0));
        let bb = Bollinger::new(BollingerParams::default());
        let result = bb.evaluate(&candles).unwrap();
        assert_eq!(result.signal, -1.0);
        assert_eq!(result.strength, 0.9);
    }

    #[test]
    fn test_breakdown_below_lower_is_bullish() {
        let mut candles = flat(40, 100.0);
        candles.push(candle(40, 100.0, 100.0, 79.0, 80.0, 1000.0));
        let bb = Bollinger::new(BollingerParams::default());
        let result = bb.evaluate(&candles).unwrap();
        assert_eq!(result.signal, 1.0);
    }
}
