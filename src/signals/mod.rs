//! Signal computation: indicator engine, pattern detectors, aggregator, and
//! price-level calculator.

pub mod aggregator;
pub mod engine;
pub mod indicators;
pub mod levels;
pub mod patterns;
pub mod ta;

use crate::error::IndicatorError;
use crate::types::{Candle, IndicatorResult};

/// A scored technical indicator.
///
/// Implementations are pure: `evaluate` reads the candle slice, applies the
/// indicator's fixed threshold table, and returns a directional vote in
/// {-1, -0.5, 0, 0.5, 1} with a strength in [0,1]. Failures are returned,
/// never panicked; the engine degrades them to neutral stubs.
pub trait Indicator: Send + Sync {
    /// Display name, also used in neutral stubs ("RSI", "Pivot Points", ...).
    fn name(&self) -> &'static str;

    /// Minimum number of candles `evaluate` needs.
    fn min_periods(&self) -> usize;

    /// Longest period parameter, feeding the engine-wide lookback precheck.
    fn lookback(&self) -> usize {
        self.min_periods().saturating_sub(1)
    }

    /// Score the indicator over the candle series.
    fn evaluate(&self, candles: &[Candle]) -> Result<IndicatorResult, IndicatorError>;
}

/// Guard shared by indicator implementations: error out when the series is
/// shorter than the indicator's requirement.
pub(crate) fn require_len(candles: &[Candle], required: usize) -> Result<(), IndicatorError> {
    if candles.len() < required {
        Err(IndicatorError::InsufficientData { required, len: candles.len() })
    } else {
        Ok(())
    }
}

/// Reject a non-finite decisive value so the engine substitutes a neutral
/// entry instead of letting NaN/Infinity reach the aggregation.
pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64, IndicatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IndicatorError::Computation(format!("{name} produced a non-finite value")))
    }
}
