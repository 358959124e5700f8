//! Classic pivot points.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult, PivotParams};

/// PP/R1/S1 over the trailing window. Price within 1.5% of S1 votes +1 at
/// 0.85 (R1 mirrored); otherwise the side of the pivot gives a half vote at
/// 0.7, and sitting exactly on it abstains.
pub struct PivotPoints {
    period: usize,
}

impl PivotPoints {
    pub fn new(params: PivotParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for PivotPoints {
    fn name(&self) -> &'static str {
        "Pivot Points"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let (pp, r1, s1) = ta::pivot_levels(candles, self.period)
            .ok_or_else(|| IndicatorError::Computation("empty pivot window".to_string()))?;
        let price = require_finite(self.name(), candles[candles.len() - 1].close)?;
        require_finite(self.name(), pp)?;

        let (signal, strength) = if (price - s1).abs() / price < 0.015 {
            (1.0, 0.85)
        } else if (price - r1).abs() / price < 0.015 {
            (-1.0, 0.85)
        } else if price > pp {
            (0.5, 0.7)
        } else if price < pp {
            (-0.5, 0.7)
        } else {
            (0.0, 0.0)
        };
        let zone = if signal > 0.0 {
            "Near Support"
        } else if signal < 0.0 {
            "Near Resistance"
        } else {
            "Neutral"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength,
            display: format!("Pivot Points: {price:.2} ({zone})"),
        })
    }
}
