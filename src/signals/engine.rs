//! Indicator engine: batch scoring and chart-series computation.

use tracing::{debug, warn};

use crate::error::IndicatorError;
use crate::signals::indicators::{
    Aroon, Atr, Bollinger, Cci, Chaikin, EmaCross, Fibonacci, Fractals, Ichimoku, MaCross, Macd,
    Obv, PivotPoints, Psar, Rsi, Stochastic, Supertrend, Volume, ZigZag,
};
use crate::signals::{ta, Indicator};
use crate::types::{
    candle::{closes, volumes},
    Candle, IndicatorConfig, IndicatorResult, IndicatorSeries, OhlcSeriesPoint, SeriesPoint,
};

/// Enabled indicators in their fixed evaluation order.
fn build_indicators(config: &IndicatorConfig) -> Vec<Box<dyn Indicator>> {
    let mut out: Vec<Box<dyn Indicator>> = Vec::new();
    if config.rsi.enabled {
        out.push(Box::new(Rsi::new(config.rsi)));
    }
    if config.stochastic.enabled {
        out.push(Box::new(Stochastic::new(config.stochastic)));
    }
    if config.macd.enabled {
        out.push(Box::new(Macd::new(config.macd)));
    }
    if config.atr.enabled {
        out.push(Box::new(Atr::new(config.atr)));
    }
    if config.ema.enabled {
        out.push(Box::new(EmaCross::new(config.ema)));
    }
    if config.ma.enabled {
        out.push(Box::new(MaCross::new(config.ma)));
    }
    if config.bollinger.enabled {
        out.push(Box::new(Bollinger::new(config.bollinger)));
    }
    if config.aroon.enabled {
        out.push(Box::new(Aroon::new(config.aroon)));
    }
    if config.pivot.enabled {
        out.push(Box::new(PivotPoints::new(config.pivot)));
    }
    if config.volume.enabled {
        out.push(Box::new(Volume::new(config.volume)));
    }
    if config.ichimoku.enabled {
        out.push(Box::new(Ichimoku::new(config.ichimoku)));
    }
    if config.fib.enabled {
        out.push(Box::new(Fibonacci::new(config.fib)));
    }
    if config.cci.enabled {
        out.push(Box::new(Cci::new(config.cci)));
    }
    if config.obv.enabled {
        out.push(Box::new(Obv));
    }
    if config.chaikin.enabled {
        out.push(Box::new(Chaikin::new(config.chaikin)));
    }
    if config.supertrend.enabled {
        out.push(Box::new(Supertrend::new(config.supertrend)));
    }
    if config.psar.enabled {
        out.push(Box::new(Psar::new(config.psar)));
    }
    if config.fractals.enabled {
        out.push(Box::new(Fractals));
    }
    if config.zigzag.enabled {
        out.push(Box::new(ZigZag::new(config.zigzag)));
    }
    out
}

/// Score every enabled indicator over the candle series.
///
/// Returns exactly one [`IndicatorResult`] per enabled indicator, in the
/// fixed evaluation order. An indicator that cannot produce a finite score
/// degrades to a neutral stub instead of failing the batch; only an
/// engine-wide shortage of candles is an error.
pub fn compute_indicators(
    candles: &[Candle],
    config: &IndicatorConfig,
) -> Result<Vec<IndicatorResult>, IndicatorError> {
    let config = config.clamped();
    let lookback = config.max_lookback();
    if candles.len() <= lookback {
        return Err(IndicatorError::InsufficientData {
            required: lookback + 1,
            len: candles.len(),
        });
    }

    let indicators = build_indicators(&config);
    debug!(count = indicators.len(), candles = candles.len(), "computing indicator batch");

    let results = indicators
        .iter()
        .map(|ind| match ind.evaluate(candles) {
            Ok(result) if result.signal.is_finite() && result.strength.is_finite() => result,
            Ok(result) => {
                warn!(indicator = ind.name(), ?result, "non-finite indicator output");
                IndicatorResult::neutral(ind.name(), "Error in calculation")
            }
            Err(IndicatorError::InsufficientData { required, len }) => {
                warn!(indicator = ind.name(), required, len, "insufficient data");
                IndicatorResult::neutral(ind.name(), "Insufficient data")
            }
            Err(err) => {
                warn!(indicator = ind.name(), %err, "indicator failed");
                IndicatorResult::neutral(ind.name(), "Error in calculation")
            }
        })
        .collect();
    Ok(results)
}

/// Map an end-aligned value series onto the candle timestamps.
fn line(candles: &[Candle], values: &[f64]) -> Vec<SeriesPoint> {
    let offset = candles.len() - values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| SeriesPoint { time: candles[offset + i].time_secs(), value: v })
        .collect()
}

/// Compute chartable per-indicator series for every enabled indicator.
///
/// Uses the same primitives as [`compute_indicators`], so the plotted values
/// always agree with the scores. Non-finite points are filtered; an
/// indicator whose series ends up empty is simply absent from the result.
pub fn compute_indicator_series(candles: &[Candle], config: &IndicatorConfig) -> IndicatorSeries {
    let config = config.clamped();
    let mut series = IndicatorSeries::new();
    if candles.is_empty() {
        return series;
    }
    let closes = closes(candles);
    let vols = volumes(candles);
    let last_time = candles[candles.len() - 1].time_secs();

    if config.rsi.enabled {
        series.insert_line("rsi", line(candles, &ta::rsi(&closes, config.rsi.period)));
    }

    if config.stochastic.enabled {
        let (k, d) = ta::stochastic(
            candles,
            config.stochastic.k,
            config.stochastic.d,
            config.stochastic.smooth,
        );
        series.insert_line("stochastic_k", line(candles, &k));
        series.insert_line("stochastic_d", line(candles, &d));
    }

    if config.macd.enabled {
        let macd = ta::macd_line(&closes, config.macd.fast, config.macd.slow);
        let signal =
            ta::macd_signal(&closes, config.macd.fast, config.macd.slow, config.macd.signal);
        let len = macd.len().min(signal.len());
        let histogram: Vec<f64> = macd[macd.len() - len..]
            .iter()
            .zip(&signal[signal.len() - len..])
            .map(|(m, s)| m - s)
            .collect();
        series.insert_line("macd", line(candles, &macd));
        series.insert_line("macd_signal", line(candles, &signal));
        series.insert_line("macd_histogram", line(candles, &histogram));
    }

    if config.atr.enabled {
        series.insert_line("atr", line(candles, &ta::atr(candles, config.atr.period)));
    }

    if config.ema.enabled {
        series.insert_line("ema_short", line(candles, &ta::ema(&closes, config.ema.short)));
        series.insert_line("ema_long", line(candles, &ta::ema(&closes, config.ema.long)));
    }

    if config.ma.enabled {
        series.insert_line("ma", line(candles, &ta::sma(&closes, config.ma.period)));
    }

    if config.bollinger.enabled {
        let bands = ta::bollinger(&closes, config.bollinger.period, config.bollinger.deviation);
        let upper: Vec<f64> = bands.iter().map(|b| b.0).collect();
        let middle: Vec<f64> = bands.iter().map(|b| b.1).collect();
        let lower: Vec<f64> = bands.iter().map(|b| b.2).collect();
        series.insert_line("bollinger_upper", line(candles, &upper));
        series.insert_line("bollinger_middle", line(candles, &middle));
        series.insert_line("bollinger_lower", line(candles, &lower));
    }

    if config.aroon.enabled {
        series.insert_line("aroon_up", line(candles, &ta::aroon_up(&closes, config.aroon.period)));
        series
            .insert_line("aroon_down", line(candles, &ta::aroon_down(&closes, config.aroon.period)));
    }

    if config.pivot.enabled {
        if let Some((pp, r1, s1)) = ta::pivot_levels(candles, config.pivot.period) {
            series.insert_line(
                "pivot",
                vec![
                    SeriesPoint { time: last_time, value: pp },
                    SeriesPoint { time: last_time, value: r1 },
                    SeriesPoint { time: last_time, value: s1 },
                ],
            );
        }
    }

    if config.volume.enabled {
        series.insert_line("volume", line(candles, &vols));
    }

    if config.ichimoku.enabled {
        let lines = ta::ichimoku(
            candles,
            config.ichimoku.tenkan,
            config.ichimoku.kijun,
            config.ichimoku.senkou,
        );
        let tenkan: Vec<f64> = lines.iter().map(|l| l.0).collect();
        let kijun: Vec<f64> = lines.iter().map(|l| l.1).collect();
        series.insert_line("ichimoku_tenkan", line(candles, &tenkan));
        series.insert_line("ichimoku_kijun", line(candles, &kijun));

        // Spans are plotted displaced forward; points past the last candle
        // clamp to its timestamp.
        let offset = candles.len() - lines.len();
        let displaced = |values: Vec<f64>| -> Vec<SeriesPoint> {
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    let idx = offset + i + config.ichimoku.displacement;
                    let time = candles.get(idx).map_or(last_time, Candle::time_secs);
                    SeriesPoint { time, value }
                })
                .collect()
        };
        series.insert_line("ichimoku_senkou_a", displaced(lines.iter().map(|l| l.2).collect()));
        series.insert_line("ichimoku_senkou_b", displaced(lines.iter().map(|l| l.3).collect()));
    }

    if config.fib.enabled {
        if let Some(levels) = ta::fib_levels(candles, config.fib.period) {
            series.insert_line(
                "fib",
                levels
                    .iter()
                    .map(|&value| SeriesPoint { time: last_time, value })
                    .collect(),
            );
        }
    }

    if config.cci.enabled {
        series.insert_line("cci", line(candles, &ta::cci(candles, config.cci.period)));
    }

    if config.obv.enabled {
        series.insert_line("obv", line(candles, &ta::obv(&closes, &vols)));
    }

    if config.chaikin.enabled {
        series.insert_line(
            "chaikin_osc",
            line(candles, &ta::chaikin_osc(candles, config.chaikin.fast, config.chaikin.slow)),
        );
    }

    if config.supertrend.enabled {
        let values: Vec<f64> =
            ta::supertrend(candles, config.supertrend.period, config.supertrend.multiplier)
                .iter()
                .map(|(v, _)| *v)
                .collect();
        series.insert_line("supertrend", line(candles, &values));
    }

    if config.psar.enabled {
        series.insert_line("psar", line(candles, &ta::psar(candles, config.psar.step, config.psar.max)));
    }

    if config.fractals.enabled {
        let marks = ta::fractals(candles);
        let points: Vec<SeriesPoint> = marks
            .iter()
            .enumerate()
            .filter_map(|(i, (bear, bull))| {
                bear.or(*bull)
                    .map(|value| SeriesPoint { time: candles[i].time_secs(), value })
            })
            .collect();
        series.insert_line("fractals", points);
    }

    if config.zigzag.enabled {
        let points: Vec<SeriesPoint> = ta::zigzag(candles, config.zigzag.deviation)
            .iter()
            .map(|s| SeriesPoint { time: candles[s.index].time_secs(), value: s.price })
            .collect();
        series.insert_line("zigzag", points);
    }

    if config.heikin_ashi.enabled {
        let points: Vec<OhlcSeriesPoint> = ta::heikin_ashi(candles)
            .iter()
            .map(|c| OhlcSeriesPoint {
                time: c.time_secs(),
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
            })
            .collect();
        series.insert_candles("ha", points);
    }

    if config.donchian.enabled {
        let channels = ta::donchian(candles, config.donchian.period);
        let upper: Vec<f64> = channels.iter().map(|c| c.0).collect();
        let middle: Vec<f64> = channels.iter().map(|c| c.1).collect();
        let lower: Vec<f64> = channels.iter().map(|c| c.2).collect();
        series.insert_line("don_upper", line(candles, &upper));
        series.insert_line("don_middle", line(candles, &middle));
        series.insert_line("don_lower", line(candles, &lower));
    }

    if config.fib_bands.enabled {
        let bands = ta::fib_bands(candles, config.fib_bands.period, config.fib_bands.multiplier);
        let upper: Vec<f64> = bands.iter().map(|b| b.0).collect();
        let lower: Vec<f64> = bands.iter().map(|b| b.1).collect();
        let vwma: Vec<f64> = bands.iter().map(|b| b.2).collect();
        series.insert_line("fibbands_upper", line(candles, &upper));
        series.insert_line("fibbands_lower", line(candles, &lower));
        series.insert_line("vwma", line(candles, &vwma));
    }

    if config.envelope.enabled {
        let bands = ta::envelope(&closes, config.envelope.period, config.envelope.deviation);
        let upper: Vec<f64> = bands.iter().map(|b| b.0).collect();
        let middle: Vec<f64> = bands.iter().map(|b| b.1).collect();
        let lower: Vec<f64> = bands.iter().map(|b| b.2).collect();
        series.insert_line("envelope_upper", line(candles, &upper));
        series.insert_line("envelope_middle", line(candles, &middle));
        series.insert_line("envelope_lower", line(candles, &lower));
    }

    series
}
