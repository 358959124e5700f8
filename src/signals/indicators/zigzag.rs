//! ZigZag swings.

use crate::error::IndicatorError;
use crate::signals::{require_len, ta, Indicator};
use crate::types::{Candle, IndicatorResult, ZigZagParams};

/// Latest swing against the previous one: a higher swing votes +1 at 0.8, a
/// lower one -1 at 0.8. A single (or equal) swing abstains at 0.5.
pub struct ZigZag {
    deviation: f64,
}

impl ZigZag {
    pub fn new(params: ZigZagParams) -> Self {
        Self { deviation: params.deviation }
    }
}

impl Indicator for ZigZag {
    fn name(&self) -> &'static str {
        "ZigZag"
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let swings = ta::zigzag(candles, self.deviation);

        let latest = swings.last().map(|s| s.price);
        let prev = swings.len().checked_sub(2).map(|i| swings[i].price).or(latest);
        let (signal, state) = match (latest, prev) {
            (Some(l), Some(p)) if l > p => (1.0, "Swing High (Bullish)"),
            (Some(l), Some(p)) if l < p => (-1.0, "Swing Low (Bearish)"),
            _ => (0.0, "Neutral"),
        };
        let display = match latest {
            Some(l) => format!("ZigZag: {l:.2} ({state})"),
            None => format!("ZigZag: No swings ({state})"),
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal != 0.0 { 0.8 } else { 0.5 },
            display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{candle, flat};
    use crate::types::Candle;

    fn from_closes(closes: &[f64]) -> Vec<Candle> {
        closes.iter().enumerate().map(|(i, &c)| candle(i, c, c, c, c, 1000.0)).collect()
    }

    #[test]
    fn test_recovery_votes_buy() {
        // Down leg then a recovery past the reversal threshold.
        let mut closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64 * 2.0).collect();
        closes.extend((1..10).map(|i| 82.0 + i as f64 * 2.0));
        let zz = ZigZag::new(ZigZagParams::default());
        let result = zz.evaluate(&from_closes(&closes)).unwrap();
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.8);
    }

    #[test]
    fn test_decline_votes_sell() {
        let mut closes: Vec<f64> = (0..10).map(|i| 82.0 + i as f64 * 2.0).collect();
        closes.extend((1..10).map(|i| 100.0 - i as f64 * 2.0));
        let zz = ZigZag::new(ZigZagParams::default());
        let result = zz.evaluate(&from_closes(&closes)).unwrap();
        assert_eq!(result.signal, -1.0);
    }

    #[test]
    fn test_flat_series_abstains() {
        let zz = ZigZag::new(ZigZagParams::default());
        let result = zz.evaluate(&flat(20, 100.0)).unwrap();
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.5);
    }
}
