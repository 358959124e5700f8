use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One point of a chartable line series. Time is in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

/// One point of a candle-shaped overlay series (Heikin-Ashi).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeriesPoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single named series, either a line or candle-shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Line(Vec<SeriesPoint>),
    Candles(Vec<OhlcSeriesPoint>),
}

/// Time-aligned per-indicator series for charting overlays.
///
/// Keys are stable series identifiers ("rsi", "macd_histogram",
/// "bollinger_upper", ...). Non-finite values are filtered out before
/// insertion, so every stored point is plottable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries(pub BTreeMap<String, SeriesData>);

impl IndicatorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line series, dropping non-finite values. Empty series are
    /// not stored.
    pub fn insert_line(&mut self, key: &str, points: Vec<SeriesPoint>) {
        let points: Vec<SeriesPoint> =
            points.into_iter().filter(|p| p.value.is_finite()).collect();
        if !points.is_empty() {
            self.0.insert(key.to_string(), SeriesData::Line(points));
        }
    }

    /// Insert a candle-shaped series, dropping points with any non-finite
    /// field.
    pub fn insert_candles(&mut self, key: &str, points: Vec<OhlcSeriesPoint>) {
        let points: Vec<OhlcSeriesPoint> = points
            .into_iter()
            .filter(|p| {
                p.open.is_finite() && p.high.is_finite() && p.low.is_finite() && p.close.is_finite()
            })
            .collect();
        if !points.is_empty() {
            self.0.insert(key.to_string(), SeriesData::Candles(points));
        }
    }

    pub fn get(&self, key: &str) -> Option<&SeriesData> {
        self.0.get(key)
    }

    pub fn line(&self, key: &str) -> Option<&[SeriesPoint]> {
        match self.0.get(key) {
            Some(SeriesData::Line(points)) => Some(points),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_points_are_dropped() {
        let mut series = IndicatorSeries::new();
        series.insert_line(
            "rsi",
            vec![
                SeriesPoint { time: 1, value: 50.0 },
                SeriesPoint { time: 2, value: f64::NAN },
                SeriesPoint { time: 3, value: f64::INFINITY },
            ],
        );
        assert_eq!(series.line("rsi").unwrap().len(), 1);
    }

    #[test]
    fn test_all_non_finite_series_is_not_stored() {
        let mut series = IndicatorSeries::new();
        series.insert_line("atr", vec![SeriesPoint { time: 1, value: f64::NAN }]);
        assert!(series.is_empty());
    }
}
