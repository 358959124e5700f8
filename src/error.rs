use thiserror::Error;

/// Failure of a single indicator computation.
///
/// These never escape the engine: the indicator that failed is replaced by a
/// neutral stub and the rest of the batch continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("insufficient data: need {required} candles, got {len}")]
    InsufficientData { required: usize, len: usize },

    #[error("computation error: {0}")]
    Computation(String),
}

/// Failure of the top-level signal aggregation.
///
/// Per-indicator and per-pattern failures degrade locally; only a failure in
/// the orchestration itself surfaces as a `SignalError`, and in that case no
/// partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("not enough candles to generate a signal: got {0}, need at least 2")]
    InsufficientCandles(usize),

    #[error("signal aggregation failed: {0}")]
    Aggregation(String),
}
