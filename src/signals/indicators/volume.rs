//! Volume surge detector.

use crate::error::IndicatorError;
use crate::signals::{require_finite, require_len, Indicator};
use crate::types::{candle::volumes, Candle, IndicatorResult, VolumeParams};

/// Latest volume against its rolling average: 1.5x above votes +1, half the
/// average votes -1, both at 0.8. In between it abstains at 0.5.
pub struct Volume {
    period: usize,
}

impl Volume {
    pub fn new(params: VolumeParams) -> Self {
        Self { period: params.period }
    }
}

impl Indicator for Volume {
    fn name(&self) -> &'static str {
        "Volume"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError> {
        require_len(candles, self.min_periods())?;
        let volumes = volumes(candles);
        let avg = volumes[volumes.len() - self.period..].iter().sum::<f64>() / self.period as f64;
        let latest = require_finite(self.name(), volumes[volumes.len() - 1])?;

        let signal = if latest > avg * 1.5 {
            1.0
        } else if latest < avg * 0.5 {
            -1.0
        } else {
            0.0
        };
        let level = if signal > 0.0 {
            "High"
        } else if signal < 0.0 {
            "Low"
        } else {
            "Average"
        };

        Ok(IndicatorResult {
            name: self.name().to_string(),
            signal,
            strength: if signal != 0.0 { 0.8 } else { 0.5 },
            display: format!("Volume: {latest:.2} ({level})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::indicators::testutil::{candle, flat};

    #[test]
    fn test_steady_volume_is_average() {
        let vol = Volume::new(VolumeParams::default());
        let result = vol.evaluate(&flat(30, 100.0)).unwrap();
        assert_eq!(result.signal, 0.0);
        assert_eq!(result.strength, 0.5);
    }

    #[test]
    fn test_surge_votes_buy() {
        let mut candles = flat(30, 100.0);
        candles.push(candle(30, 100.0, 100.0, 100.0, 100.0, 10_000.0));
        let vol = Volume::new(VolumeParams::default());
        let result = vol.evaluate(&candles).unwrap();
        assert_eq!(result.signal, 1.0);
        assert_eq!(result.strength, 0.8);
    }

    #[test]
    fn test_dry_up_votes_sell() {
        let mut candles = flat(30, 100.0);
        candles.push(candle(30, 100.0, 100.0, 100.0, 100.0, 10.0));
        let vol = Volume::new(VolumeParams::default());
        let result = vol.evaluate(&candles).unwrap();
        assert_eq!(result.signal, -1.0);
    }
}
