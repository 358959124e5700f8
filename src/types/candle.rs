use serde::{Deserialize, Serialize};

/// A single OHLCV candle as supplied by the market-data collaborator.
///
/// Candle series are expected to be ordered ascending by `open_time` with no
/// duplicate timestamps, prices non-negative and `high >= low`. The core
/// never mutates a series it is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Open time in Unix milliseconds.
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Close time in Unix milliseconds.
    pub close_time: i64,
    /// Volume denominated in the quote asset.
    pub quote_volume: f64,
}

impl Candle {
    /// Build a candle from the 8-field row shape used by exchange kline APIs:
    /// `[open_time, open, high, low, close, volume, close_time, quote_volume]`.
    pub fn from_row(row: [f64; 8]) -> Self {
        Self {
            open_time: row[0] as i64,
            open: row[1],
            high: row[2],
            low: row[3],
            close: row[4],
            volume: row[5],
            close_time: row[6] as i64,
            quote_volume: row[7],
        }
    }

    /// Absolute distance between open and close.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-to-low extent.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Open time in Unix seconds, the resolution chart series use.
    pub fn time_secs(&self) -> i64 {
        self.open_time / 1000
    }
}

/// Collect close prices from a candle slice.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Collect high prices from a candle slice.
pub fn highs(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.high).collect()
}

/// Collect low prices from a candle slice.
pub fn lows(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.low).collect()
}

/// Collect volumes from a candle slice.
pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row() {
        let c = Candle::from_row([1000.0, 1.0, 3.0, 0.5, 2.0, 100.0, 1999.0, 200.0]);
        assert_eq!(c.open_time, 1000);
        assert_eq!(c.close_time, 1999);
        assert_eq!(c.body(), 1.0);
        assert_eq!(c.range(), 2.5);
        assert_eq!(c.time_secs(), 1);
    }
}
