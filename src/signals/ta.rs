//! Shared technical-analysis primitives.
//!
//! Every series function here is used by both the scoring path
//! (`compute_indicators`) and the charting path (`compute_indicator_series`)
//! so the two can never drift numerically.
//!
//! Outputs are end-aligned: a returned vector of length `m` computed from
//! `n` inputs describes candle indices `n - m .. n`. Callers derive the
//! offset as `n - m` when mapping values back to timestamps. Degenerate
//! windows (zero range, zero deviation) produce non-finite values which the
//! callers filter or degrade to neutral.

use crate::types::Candle;

/// Simple moving average; output length `n - period + 1`.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    out.push(sum / period as f64);
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out.push(sum / period as f64);
    }
    out
}

/// Exponential moving average seeded with the SMA of the first `period`
/// values; output length `n - period + 1`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period + 1);
    let k = 2.0 / (period as f64 + 1.0);
    let mut current: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out.push(current);
    for &v in &values[period..] {
        current = (v - current) * k + current;
        out.push(current);
    }
    out
}

/// Volume-weighted moving average; output length `n - period + 1`.
pub fn vwma(values: &[f64], volumes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period || volumes.len() != values.len() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period + 1);
    for i in period - 1..values.len() {
        let window = i + 1 - period..=i;
        let pv: f64 = window.clone().map(|j| values[j] * volumes[j]).sum();
        let v: f64 = window.map(|j| volumes[j]).sum();
        out.push(pv / v);
    }
    out
}

/// Wilder-smoothed RSI; output length `n - period`, first value at candle
/// index `period`. A series with neither gains nor losses yields NaN.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period + 1 {
        return Vec::new();
    }
    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);
    for i in 1..values.len() {
        let change = values[i] - values[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(gains.len() - period + 1);
    out.push(100.0 - 100.0 / (1.0 + avg_gain / avg_loss));
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        out.push(100.0 - 100.0 / (1.0 + avg_gain / avg_loss));
    }
    out
}

/// True range of a candle against the previous close.
pub fn true_range(current: &Candle, previous: &Candle) -> f64 {
    let hl = current.high - current.low;
    let hc = (current.high - previous.close).abs();
    let lc = (current.low - previous.close).abs();
    hl.max(hc).max(lc)
}

/// Wilder-smoothed ATR; output length `n - period`, first value at candle
/// index `period`.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    if period == 0 || candles.len() < period + 1 {
        return Vec::new();
    }
    let trs: Vec<f64> =
        (1..candles.len()).map(|i| true_range(&candles[i], &candles[i - 1])).collect();
    let mut current: f64 = trs[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(trs.len() - period + 1);
    out.push(current);
    for &tr in &trs[period..] {
        current = (current * (period - 1) as f64 + tr) / period as f64;
        out.push(current);
    }
    out
}

/// Stochastic oscillator: smoothed %K and %D series, both end-aligned.
/// A zero-range window yields NaN for that point.
pub fn stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
    smoothing: usize,
) -> (Vec<f64>, Vec<f64>) {
    if k_period == 0 || candles.len() < k_period {
        return (Vec::new(), Vec::new());
    }
    let mut raw_k = Vec::with_capacity(candles.len() - k_period + 1);
    for i in k_period - 1..candles.len() {
        let window = &candles[i + 1 - k_period..=i];
        let hh = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let ll = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        raw_k.push((candles[i].close - ll) / (hh - ll) * 100.0);
    }
    let k = sma(&raw_k, smoothing.max(1));
    let d = sma(&k, d_period.max(1));
    (k, d)
}

/// MACD line: fast EMA minus slow EMA, aligned on the slow end; output
/// length `n - slow + 1`.
pub fn macd_line(values: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);
    let len = fast_ema.len().min(slow_ema.len());
    if len == 0 {
        return Vec::new();
    }
    let fast_tail = &fast_ema[fast_ema.len() - len..];
    let slow_tail = &slow_ema[slow_ema.len() - len..];
    fast_tail.iter().zip(slow_tail).map(|(f, s)| f - s).collect()
}

/// Signal line: EMA of the MACD line.
pub fn macd_signal(values: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<f64> {
    ema(&macd_line(values, fast, slow), signal)
}

/// Aroon Up; output length `n - period`, first value at candle index
/// `period`. Each value looks back over a window of `period + 1` points.
pub fn aroon_up(values: &[f64], period: usize) -> Vec<f64> {
    aroon_side(values, period, true)
}

/// Aroon Down; aligned like [`aroon_up`].
pub fn aroon_down(values: &[f64], period: usize) -> Vec<f64> {
    aroon_side(values, period, false)
}

/// Aroon Oscillator = Up - Down.
pub fn aroon_osc(values: &[f64], period: usize) -> Vec<f64> {
    aroon_up(values, period)
        .into_iter()
        .zip(aroon_down(values, period))
        .map(|(u, d)| u - d)
        .collect()
}

fn aroon_side(values: &[f64], period: usize, up: bool) -> Vec<f64> {
    if period == 0 || values.len() < period + 1 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period);
    for i in period..values.len() {
        let window = &values[i - period..=i];
        // First occurrence of the extreme within the window.
        let mut best = 0usize;
        for (j, &v) in window.iter().enumerate() {
            let better = if up { v > window[best] } else { v < window[best] };
            if better {
                best = j;
            }
        }
        out.push(best as f64 / period as f64 * 100.0);
    }
    out
}

/// Commodity Channel Index; output length `n - period + 1`. A window with
/// zero mean deviation yields NaN.
pub fn cci(candles: &[Candle], period: usize) -> Vec<f64> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }
    let tp: Vec<f64> = candles.iter().map(|c| (c.high + c.low + c.close) / 3.0).collect();
    let mut out = Vec::with_capacity(candles.len() - period + 1);
    for i in period - 1..tp.len() {
        let window = &tp[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let dev = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period as f64;
        out.push((tp[i] - mean) / (0.015 * dev));
    }
    out
}

/// On-balance volume; output length `n`.
pub fn obv(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    let mut total = 0.0;
    for i in 0..closes.len() {
        if i > 0 {
            if closes[i] > closes[i - 1] {
                total += volumes[i];
            } else if closes[i] < closes[i - 1] {
                total -= volumes[i];
            }
        }
        out.push(total);
    }
    out
}

/// Accumulation/distribution line; output length `n`. A zero-range candle
/// contributes no flow.
pub fn ad_line(candles: &[Candle]) -> Vec<f64> {
    let mut out = Vec::with_capacity(candles.len());
    let mut total = 0.0;
    for c in candles {
        let range = c.high - c.low;
        if range > 0.0 {
            let mfm = ((c.close - c.low) - (c.high - c.close)) / range;
            total += mfm * c.volume;
        }
        out.push(total);
    }
    out
}

/// Chaikin oscillator: fast EMA of the A/D line minus slow EMA, aligned on
/// the slow end.
pub fn chaikin_osc(candles: &[Candle], fast: usize, slow: usize) -> Vec<f64> {
    let ad = ad_line(candles);
    let fast_ema = ema(&ad, fast);
    let slow_ema = ema(&ad, slow);
    let len = fast_ema.len().min(slow_ema.len());
    if len == 0 {
        return Vec::new();
    }
    let fast_tail = &fast_ema[fast_ema.len() - len..];
    let slow_tail = &slow_ema[slow_ema.len() - len..];
    fast_tail.iter().zip(slow_tail).map(|(f, s)| f - s).collect()
}

/// Supertrend: (line value, direction) per candle, direction +1 bullish or
/// -1 bearish; output starts at candle index `period + 1`.
pub fn supertrend(candles: &[Candle], period: usize, multiplier: f64) -> Vec<(f64, i8)> {
    let atr_vals = atr(candles, period);
    if atr_vals.len() < 2 {
        return Vec::new();
    }
    let offset = candles.len() - atr_vals.len();
    let mut out = Vec::with_capacity(atr_vals.len() - 1);

    let first = &candles[offset];
    let hl2 = (first.high + first.low) / 2.0;
    let mut final_upper = hl2 + multiplier * atr_vals[0];
    let mut final_lower = hl2 - multiplier * atr_vals[0];
    let mut trend: i8 = 1;

    for k in 1..atr_vals.len() {
        let c = &candles[offset + k];
        let prev_close = candles[offset + k - 1].close;
        let hl2 = (c.high + c.low) / 2.0;
        let basic_upper = hl2 + multiplier * atr_vals[k];
        let basic_lower = hl2 - multiplier * atr_vals[k];

        final_upper = if basic_upper < final_upper || prev_close > final_upper {
            basic_upper
        } else {
            final_upper
        };
        final_lower = if basic_lower > final_lower || prev_close < final_lower {
            basic_lower
        } else {
            final_lower
        };

        trend = match trend {
            1 if c.close < final_lower => -1,
            -1 if c.close > final_upper => 1,
            t => t,
        };
        let value = if trend == 1 { final_lower } else { final_upper };
        out.push((value, trend));
    }
    out
}

/// Parabolic SAR; output length `n - 1`, first value at candle index 1.
pub fn psar(candles: &[Candle], step: f64, max_step: f64) -> Vec<f64> {
    if candles.len() < 2 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(candles.len() - 1);
    let mut uptrend = candles[1].close >= candles[0].close;
    let mut sar = if uptrend { candles[0].low } else { candles[0].high };
    let mut extreme = if uptrend { candles[0].high } else { candles[0].low };
    let mut af = step;

    for i in 1..candles.len() {
        let c = &candles[i];
        sar += af * (extreme - sar);
        if uptrend {
            sar = sar.min(candles[i - 1].low);
            if c.low < sar {
                uptrend = false;
                sar = extreme;
                extreme = c.low;
                af = step;
            } else if c.high > extreme {
                extreme = c.high;
                af = (af + step).min(max_step);
            }
        } else {
            sar = sar.max(candles[i - 1].high);
            if c.high > sar {
                uptrend = true;
                sar = extreme;
                extreme = c.high;
                af = step;
            } else if c.low < extreme {
                extreme = c.low;
                af = (af + step).min(max_step);
            }
        }
        out.push(sar);
    }
    out
}

/// Bill Williams fractal marks, one entry per candle:
/// `(bearish high fractal, bullish low fractal)`. A mark needs two candles
/// of confirmation on each side, so the last two entries are always empty.
pub fn fractals(candles: &[Candle]) -> Vec<(Option<f64>, Option<f64>)> {
    let n = candles.len();
    let mut out = vec![(None, None); n];
    if n < 5 {
        return out;
    }
    for i in 2..n - 2 {
        let h = candles[i].high;
        if h > candles[i - 1].high
            && h > candles[i - 2].high
            && h > candles[i + 1].high
            && h > candles[i + 2].high
        {
            out[i].0 = Some(h);
        }
        let l = candles[i].low;
        if l < candles[i - 1].low
            && l < candles[i - 2].low
            && l < candles[i + 1].low
            && l < candles[i + 2].low
        {
            out[i].1 = Some(l);
        }
    }
    out
}

/// Most recent fractal mark within the last `within` candles, if any.
pub fn latest_fractal(
    marks: &[(Option<f64>, Option<f64>)],
    within: usize,
) -> (Option<f64>, Option<f64>) {
    let start = marks.len().saturating_sub(within);
    marks[start..]
        .iter()
        .rev()
        .find(|(bear, bull)| bear.is_some() || bull.is_some())
        .copied()
        .unwrap_or((None, None))
}

/// Whether a swing pivot is a local maximum or minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingKind {
    High,
    Low,
}

/// One ZigZag swing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    /// Candle index of the pivot.
    pub index: usize,
    pub price: f64,
    pub kind: SwingKind,
}

/// ZigZag swings over the close series with a fractional reversal threshold.
/// Pivots alternate between highs and lows; the running extreme of the
/// current leg is included as a provisional final swing.
pub fn zigzag(candles: &[Candle], deviation: f64) -> Vec<Swing> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let n = closes.len();
    if n < 2 || deviation <= 0.0 {
        return Vec::new();
    }

    let mut swings = Vec::new();
    // Establish the initial leg direction from the first move away from the
    // start that exceeds the threshold.
    let mut up = true;
    let mut extreme = closes[0];
    let mut extreme_idx = 0usize;
    let mut seeded = false;

    for (i, &price) in closes.iter().enumerate().skip(1) {
        if !seeded {
            if price >= closes[0] * (1.0 + deviation) {
                up = true;
                seeded = true;
                extreme = price;
                extreme_idx = i;
                swings.push(Swing { index: 0, price: closes[0], kind: SwingKind::Low });
            } else if price <= closes[0] * (1.0 - deviation) {
                up = false;
                seeded = true;
                extreme = price;
                extreme_idx = i;
                swings.push(Swing { index: 0, price: closes[0], kind: SwingKind::High });
            }
            continue;
        }

        if up {
            if price > extreme {
                extreme = price;
                extreme_idx = i;
            } else if price <= extreme * (1.0 - deviation) {
                swings.push(Swing { index: extreme_idx, price: extreme, kind: SwingKind::High });
                up = false;
                extreme = price;
                extreme_idx = i;
            }
        } else if price < extreme {
            extreme = price;
            extreme_idx = i;
        } else if price >= extreme * (1.0 + deviation) {
            swings.push(Swing { index: extreme_idx, price: extreme, kind: SwingKind::Low });
            up = true;
            extreme = price;
            extreme_idx = i;
        }
    }

    if seeded {
        let kind = if up { SwingKind::High } else { SwingKind::Low };
        swings.push(Swing { index: extreme_idx, price: extreme, kind });
    }
    swings
}

/// Heikin-Ashi transform; output length `n`, timestamps and volume carried
/// over from the source candles.
pub fn heikin_ashi(candles: &[Candle]) -> Vec<Candle> {
    let mut out: Vec<Candle> = Vec::with_capacity(candles.len());
    for (i, c) in candles.iter().enumerate() {
        let ha_close = (c.open + c.high + c.low + c.close) / 4.0;
        let ha_open = if i == 0 {
            (c.open + c.close) / 2.0
        } else {
            let prev = &out[i - 1];
            (prev.open + prev.close) / 2.0
        };
        out.push(Candle {
            open: ha_open,
            high: c.high.max(ha_open).max(ha_close),
            low: c.low.min(ha_open).min(ha_close),
            close: ha_close,
            ..*c
        });
    }
    out
}

/// Donchian channel (upper, middle, lower); output length `n - period + 1`.
pub fn donchian(candles: &[Candle], period: usize) -> Vec<(f64, f64, f64)> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(candles.len() - period + 1);
    for i in period - 1..candles.len() {
        let window = &candles[i + 1 - period..=i];
        let upper = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let lower = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        out.push((upper, (upper + lower) / 2.0, lower));
    }
    out
}

/// Fibonacci bands around a VWMA: ATR-scaled offsets at the outermost
/// (1.0) ratio, plus the VWMA itself. Output is (upper, lower, vwma),
/// end-aligned on the shorter of the VWMA and ATR series.
pub fn fib_bands(candles: &[Candle], period: usize, multiplier: f64) -> Vec<(f64, f64, f64)> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let vols: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let vwma_vals = vwma(&closes, &vols, period);
    let atr_vals = atr(candles, period);
    let len = vwma_vals.len().min(atr_vals.len());
    if len == 0 {
        return Vec::new();
    }
    let vwma_tail = &vwma_vals[vwma_vals.len() - len..];
    let atr_tail = &atr_vals[atr_vals.len() - len..];
    vwma_tail
        .iter()
        .zip(atr_tail)
        .map(|(m, a)| (m + multiplier * a, m - multiplier * a, *m))
        .collect()
}

/// Bollinger bands (upper, middle, lower) around an SMA with population
/// standard-deviation offsets; output length `n - period + 1`.
pub fn bollinger(values: &[f64], period: usize, deviation: f64) -> Vec<(f64, f64, f64)> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len() - period + 1);
    for i in period - 1..values.len() {
        let window = &values[i + 1 - period..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let var = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        let band = deviation * var.sqrt();
        out.push((mean + band, mean, mean - band));
    }
    out
}

fn window_midpoint(candles: &[Candle]) -> f64 {
    let hh = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let ll = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    (hh + ll) / 2.0
}

/// Ichimoku lines (tenkan, kijun, senkou A, senkou B), end-aligned on the
/// senkou period; output length `n - senkou + 1`. Spans are undisplaced;
/// the charting layer shifts them forward by the displacement.
pub fn ichimoku(
    candles: &[Candle],
    tenkan: usize,
    kijun: usize,
    senkou: usize,
) -> Vec<(f64, f64, f64, f64)> {
    let longest = tenkan.max(kijun).max(senkou);
    if longest == 0 || candles.len() < longest {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(candles.len() - longest + 1);
    for i in longest - 1..candles.len() {
        let t = window_midpoint(&candles[i + 1 - tenkan..=i]);
        let k = window_midpoint(&candles[i + 1 - kijun..=i]);
        let b = window_midpoint(&candles[i + 1 - senkou..=i]);
        out.push((t, k, (t + k) / 2.0, b));
    }
    out
}

/// Envelope bands (upper, middle, lower) around an SMA; output length
/// `n - period + 1`.
pub fn envelope(values: &[f64], period: usize, deviation: f64) -> Vec<(f64, f64, f64)> {
    sma(values, period)
        .into_iter()
        .map(|mid| (mid * (1.0 + deviation), mid, mid * (1.0 - deviation)))
        .collect()
}

/// Classic pivot levels (PP, R1, S1) over the trailing `period` candles.
pub fn pivot_levels(candles: &[Candle], period: usize) -> Option<(f64, f64, f64)> {
    if candles.is_empty() {
        return None;
    }
    let window = &candles[candles.len().saturating_sub(period)..];
    let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let close = window.last()?.close;
    let pp = (high + low + close) / 3.0;
    Some((pp, 2.0 * pp - low, 2.0 * pp - high))
}

/// Fibonacci retracement levels (23.6/38.2/50/61.8%) of the trailing
/// `period` candle range, low to high.
pub fn fib_levels(candles: &[Candle], period: usize) -> Option<[f64; 4]> {
    if candles.is_empty() {
        return None;
    }
    let window = &candles[candles.len().saturating_sub(period)..];
    let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let span = high - low;
    Some([low + span * 0.236, low + span * 0.382, low + span * 0.5, low + span * 0.618])
}

/// Projected support level: a line through the local minima of the trailing
/// `window` closes, evaluated at the last index. With fewer than two minima
/// the lowest close stands in. Returns None for a degenerate window or a
/// non-finite projection.
pub fn support_line(closes: &[f64], window: usize) -> Option<f64> {
    pivot_line(closes, window, false)
}

/// Projected resistance level; mirror of [`support_line`] over local maxima.
pub fn resistance_line(closes: &[f64], window: usize) -> Option<f64> {
    pivot_line(closes, window, true)
}

fn pivot_line(closes: &[f64], window: usize, upper: bool) -> Option<f64> {
    if closes.is_empty() {
        return None;
    }
    let start = closes.len().saturating_sub(window);
    let slice = &closes[start..];
    if slice.len() < 2 {
        return slice.first().copied().filter(|v| v.is_finite());
    }

    let mut pivots: Vec<(usize, f64)> = Vec::new();
    for i in 1..slice.len() - 1 {
        let is_pivot = if upper {
            slice[i] >= slice[i - 1] && slice[i] >= slice[i + 1]
        } else {
            slice[i] <= slice[i - 1] && slice[i] <= slice[i + 1]
        };
        if is_pivot {
            pivots.push((i, slice[i]));
        }
    }

    let last_idx = (slice.len() - 1) as f64;
    let value = match pivots.len() {
        0 => {
            if upper {
                slice.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            } else {
                slice.iter().copied().fold(f64::INFINITY, f64::min)
            }
        }
        1 => pivots[0].1,
        _ => {
            let (i1, p1) = pivots[0];
            let (i2, p2) = pivots[pivots.len() - 1];
            let slope = (p2 - p1) / (i2 - i1) as f64;
            p2 + slope * (last_idx - i2 as f64)
        }
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(n: usize, price: f64) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                open_time: 1_700_000_000_000 + i as i64 * 60_000,
                open: price,
                high: price,
                low: price,
                close: price,
                volume: 1000.0,
                close_time: 1_700_000_000_000 + (i as i64 + 1) * 60_000 - 1,
                quote_volume: price * 1000.0,
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_short_input() {
        assert!(sma(&[1.0, 2.0], 3).is_empty());
    }

    #[test]
    fn test_ema_converges_toward_latest() {
        let values: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let out = ema(&values, 10);
        let last = *out.last().unwrap();
        assert!(last > 140.0 && last < 149.0, "ema last = {last}");
    }

    #[test]
    fn test_rsi_flat_is_nan() {
        let closes = vec![100.0; 30];
        let out = rsi(&closes, 14);
        assert!(out.last().unwrap().is_nan());
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&closes, 14);
        assert_relative_eq!(*out.last().unwrap(), 100.0);
    }

    #[test]
    fn test_aroon_strict_uptrend() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(*aroon_up(&closes, 25).last().unwrap(), 100.0);
        assert_relative_eq!(*aroon_down(&closes, 25).last().unwrap(), 0.0);
        assert_relative_eq!(*aroon_osc(&closes, 25).last().unwrap(), 100.0);
    }

    #[test]
    fn test_aroon_flat_is_zero_osc() {
        let closes = vec![100.0; 30];
        assert_relative_eq!(*aroon_osc(&closes, 25).last().unwrap(), 0.0);
    }

    #[test]
    fn test_obv_accumulates() {
        let out = obv(&[1.0, 2.0, 1.5, 1.5], &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(out, vec![0.0, 20.0, -10.0, -10.0]);
    }

    #[test]
    fn test_atr_flat_is_zero() {
        let candles = flat(30, 100.0);
        assert_relative_eq!(*atr(&candles, 14).last().unwrap(), 0.0);
    }

    #[test]
    fn test_heikin_ashi_flat_is_flat() {
        let candles = flat(5, 100.0);
        let ha = heikin_ashi(&candles);
        assert_eq!(ha.len(), 5);
        for c in ha {
            assert_relative_eq!(c.open, 100.0);
            assert_relative_eq!(c.close, 100.0);
        }
    }

    #[test]
    fn test_zigzag_v_shape() {
        let mut closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64 * 2.0).collect();
        closes.extend((0..10).map(|i| 82.0 + i as f64 * 2.0));
        let candles: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &p)| Candle {
                open_time: i as i64 * 60_000,
                open: p,
                high: p,
                low: p,
                close: p,
                volume: 1.0,
                close_time: i as i64 * 60_000 + 59_999,
                quote_volume: p,
            })
            .collect();
        let swings = zigzag(&candles, 0.05);
        assert!(swings.len() >= 2);
        // The trough should appear as a Low pivot.
        assert!(swings
            .iter()
            .any(|s| s.kind == SwingKind::Low && (s.price - 82.0).abs() < 1e-9));
        assert_eq!(swings.last().unwrap().kind, SwingKind::High);
    }

    #[test]
    fn test_support_line_fallback_is_min() {
        // Strictly decreasing closes have no interior minima.
        let closes: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        let support = support_line(&closes, 10).unwrap();
        assert_relative_eq!(support, 91.0);
    }

    #[test]
    fn test_donchian_window() {
        let candles = flat(10, 50.0);
        let (upper, middle, lower) = *donchian(&candles, 5).last().unwrap();
        assert_relative_eq!(upper, 50.0);
        assert_relative_eq!(middle, 50.0);
        assert_relative_eq!(lower, 50.0);
    }

    #[test]
    fn test_bollinger_flat_bands_collapse() {
        let closes = vec![100.0; 25];
        let (upper, middle, lower) = *bollinger(&closes, 20, 2.0).last().unwrap();
        assert_relative_eq!(upper, 100.0);
        assert_relative_eq!(middle, 100.0);
        assert_relative_eq!(lower, 100.0);
    }

    #[test]
    fn test_ichimoku_flat_lines_at_price() {
        let candles = flat(60, 100.0);
        let (t, k, a, b) = *ichimoku(&candles, 9, 26, 52).last().unwrap();
        assert_relative_eq!(t, 100.0);
        assert_relative_eq!(k, 100.0);
        assert_relative_eq!(a, 100.0);
        assert_relative_eq!(b, 100.0);
    }

    #[test]
    fn test_supertrend_uptrend_is_bullish() {
        let candles: Vec<Candle> = (0..40)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                Candle {
                    open_time: i as i64 * 60_000,
                    open: base,
                    high: base + 1.0,
                    low: base - 1.0,
                    close: base + 0.5,
                    volume: 1000.0,
                    close_time: i as i64 * 60_000 + 59_999,
                    quote_volume: base * 1000.0,
                }
            })
            .collect();
        let (_, direction) = *supertrend(&candles, 10, 3.0).last().unwrap();
        assert_eq!(direction, 1);
    }
}
