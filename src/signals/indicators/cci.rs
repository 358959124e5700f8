//! Commodity Channel Index.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, CciParams, IndicatorResult};

/// CCI against the +/-100 bands: beyond a band is a full contrarian vote at
/// 0.9, inside the bands the sign of the reading gives a half vote at 0.6.
pub struct Cci {
    period: usize,
}

impl Cci {
    pub fn new(params: CciParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &'static str {
        "CCI"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let values = ta::cci(candles, self.period);
        let latest = require_finite(self.name(), values.last().copied().unwrap_or(f64::NAN))?;

        let (signal, zone) = if latest > 100.0 {
            (-1.0, "Overbought")
        } else if latest < -100.0 {
            (1.0, "Oversold")
        } else if latest > 0.0 {
            (0.5, "Bullish")
        } else {
            (-0.5, "Bearish")
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if latest.abs() > 100.0 { 0.9 } else { 0.6 },
            display: format!("CCI: {latest:.2} ({zone})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{downtrend, flat, uptrend};

    #[test]
    fn test_uptrend_is_overbought() {
        let cci = Cci::new(CciParams::default());
        let result = cci.evaluate(&uptrend(50)).unwrap();
        assert_eq!(result.signal, -1.0);
        assert_eq!(result.strength, 0.9);
    }

    #[test]
    fn test_downtrend_is_oversold() {
        let cci = Cci::new(CciParams::default());
        let result = cci.evaluate(&downtrend(50)).unwrap();
        assert_eq!(result.signal, 1.0);
    }

    #[test]
    fn test_flat_series_is_an_error() {
        // Zero mean deviation leaves CCI undefined.
        let cci = Cci::new(CciParams::default());
        assert!(cci.evaluate(&flat(50, 100.0)).is_err());
    }
}
