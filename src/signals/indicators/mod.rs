//! Scored indicator implementations, one module per family.
//!
//! Each module holds a struct built from its config section and implements
//! [`crate::signals::Indicator`]. The engine owns ordering and degradation;
//! the implementations only compute and score.

pub mod aroon;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod chaikin;
pub mod ema;
pub mod fibonacci;
pub mod fractals;
pub mod ichimoku;
pub mod ma;
pub mod macd;
pub mod obv;
pub mod pivot;
pub mod psar;
pub mod rsi;
pub mod stochastic;
pub mod supertrend;
pub mod volume;
pub mod zigzag;

pub use aroon::Aroon;
pub use atr::Atr;
pub use bollinger::Bollinger;
pub use cci::Cci;
pub use chaikin::Chaikin;
pub use ema::EmaCross;
pub use fibonacci::Fibonacci;
pub use fractals::Fractals;
pub use ichimoku::Ichimoku;
pub use ma::MaCross;
pub use macd::Macd;
pub use obv::Obv;
pub use pivot::PivotPoints;
pub use psar::Psar;
pub use rsi::Rsi;
pub use stochastic::Stochastic;
pub use supertrend::Supertrend;
pub use volume::Volume;
pub use zigzag::ZigZag;

#[cfg(test)]
pub(crate) mod testutil {
    use crate::types::Candle;

    /// Synthetic candle at a fixed one-minute cadence.
    pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
        Candle {
            open_time: 1_700_000_000_000 + i as i64 * 60_000,
            open,
            high,
            low,
            close,
            volume,
            close_time: 1_700_000_000_000 + (i as i64 + 1) * 60_000 - 1,
            quote_volume: close * volume,
        }
    }

    pub fn uptrend(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                candle(i, base, base + 2.0, base - 1.0, base + 1.0, 1000.0)
            })
            .collect()
    }

    pub fn downtrend(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 200.0 - i as f64 * 1.5;
                candle(i, base, base + 1.0, base - 2.0, base - 1.0, 1000.0)
            })
            .collect()
    }

    pub fn flat(count: usize, price: f64) -> Vec<Candle> {
        (0..count).map(|i| candle(i, price, price, price, price, 1000.0)).collect()
    }
}
