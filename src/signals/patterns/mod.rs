//! Candlestick and chart pattern detectors.
//!
//! The two detectors resolve matches differently on purpose: candlestick
//! rules live in a fixed priority table where the first match wins, while
//! chart patterns are all collected and the strongest one wins.

pub mod candlestick;
pub mod chart;

pub use candlestick::detect_candlestick_patterns;
pub use chart::detect_chart_patterns;
