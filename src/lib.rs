//! Seance - composite trading-signal engine for OHLCV candle series.
//!
//! Combines three independently scored analyses into one trading signal:
//! candlestick-pattern recognition, chart-pattern recognition, and a
//! configurable bank of technical indicators. The composite score maps to a
//! discrete Buy/Sell/Hold label which in turn drives derived price levels
//! (entry, stop-loss, take-profit, support, resistance) and a profit/loss
//! projection.
//!
//! The crate is a pure, synchronous library: every entry point runs to
//! completion on the calling thread over borrowed, immutable inputs. Data
//! acquisition, chart rendering, and persistence are the caller's problem.

pub mod error;
pub mod signals;
pub mod types;

pub use error::{IndicatorError, SignalError};
pub use signals::aggregator::generate_trading_signal;
pub use signals::engine::{compute_indicator_series, compute_indicators};
pub use signals::levels::calculate_price_levels;
pub use signals::patterns::{detect_candlestick_patterns, detect_chart_patterns};
pub use types::*;
