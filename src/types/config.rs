//! Configuration snapshots consumed read-only by the core.
//!
//! The UI (or any other caller) owns the live configuration; the core only
//! ever sees an explicit snapshot passed per invocation. Every parameter has
//! a documented default and [min,max] range; `clamped()` normalizes a
//! snapshot into that range so out-of-band values degrade gracefully instead
//! of failing the call.

use serde::{Deserialize, Serialize};
use tracing::warn;

fn clamp_usize(v: usize, min: usize, max: usize) -> usize {
    v.clamp(min, max)
}

/// Clamp a float parameter, substituting `default` for non-finite input.
fn clamp_f64(v: f64, default: f64, min: f64, max: f64) -> f64 {
    if v.is_finite() {
        v.clamp(min, max)
    } else {
        default
    }
}

/// Enable flag with no extra parameters (OBV, fractals, Heikin-Ashi).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub enabled: bool,
}

impl Toggle {
    pub fn on() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiParams {
    pub enabled: bool,
    /// Lookback period, default 14, range [5,50].
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { enabled: false, period: 14 }
    }
}

impl RsiParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 50), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StochasticParams {
    pub enabled: bool,
    /// %K period, default 14, range [5,50].
    pub k: usize,
    /// %D period, default 3, range [1,10].
    pub d: usize,
    /// %K smoothing, default 3, range [1,10].
    pub smooth: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self { enabled: false, k: 14, d: 3, smooth: 3 }
    }
}

impl StochasticParams {
    fn clamped(self) -> Self {
        Self {
            k: clamp_usize(self.k, 5, 50),
            d: clamp_usize(self.d, 1, 10),
            smooth: clamp_usize(self.smooth, 1, 10),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub enabled: bool,
    /// Fast EMA period, default 12, range [5,50].
    pub fast: usize,
    /// Slow EMA period, default 26, range [10,100].
    pub slow: usize,
    /// Signal EMA period, default 9, range [5,50].
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self { enabled: false, fast: 12, slow: 26, signal: 9 }
    }
}

impl MacdParams {
    fn clamped(self) -> Self {
        Self {
            fast: clamp_usize(self.fast, 5, 50),
            slow: clamp_usize(self.slow, 10, 100),
            signal: clamp_usize(self.signal, 5, 50),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtrParams {
    pub enabled: bool,
    /// Lookback period, default 14, range [5,50].
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { enabled: false, period: 14 }
    }
}

impl AtrParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 50), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaParams {
    pub enabled: bool,
    /// Short EMA period, default 12, range [5,50].
    pub short: usize,
    /// Long EMA period, default 26, range [10,100].
    pub long: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { enabled: false, short: 12, long: 26 }
    }
}

impl EmaParams {
    fn clamped(self) -> Self {
        Self {
            short: clamp_usize(self.short, 5, 50),
            long: clamp_usize(self.long, 10, 100),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaParams {
    pub enabled: bool,
    /// SMA period, default 20, range [5,100].
    pub period: usize,
}

impl Default for MaParams {
    fn default() -> Self {
        Self { enabled: false, period: 20 }
    }
}

impl MaParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 100), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerParams {
    pub enabled: bool,
    /// Period, default 20, range [10,100].
    pub period: usize,
    /// Standard-deviation multiplier, default 2.0, range [0.5,5.0].
    pub deviation: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self { enabled: false, period: 20, deviation: 2.0 }
    }
}

impl BollingerParams {
    fn clamped(self) -> Self {
        Self {
            period: clamp_usize(self.period, 10, 100),
            deviation: clamp_f64(self.deviation, 2.0, 0.5, 5.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AroonParams {
    pub enabled: bool,
    /// Lookback period, default 25, range [5,100].
    pub period: usize,
}

impl Default for AroonParams {
    fn default() -> Self {
        Self { enabled: false, period: 25 }
    }
}

impl AroonParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 100), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotParams {
    pub enabled: bool,
    /// Trailing window, default 14, range [5,50].
    pub period: usize,
}

impl Default for PivotParams {
    fn default() -> Self {
        Self { enabled: false, period: 14 }
    }
}

impl PivotParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 50), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeParams {
    pub enabled: bool,
    /// Rolling-average window, default 14, range [5,50].
    pub period: usize,
}

impl Default for VolumeParams {
    fn default() -> Self {
        Self { enabled: false, period: 14 }
    }
}

impl VolumeParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 50), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IchimokuParams {
    pub enabled: bool,
    /// Tenkan-sen period, default 9, range [5,50].
    pub tenkan: usize,
    /// Kijun-sen period, default 26, range [10,100].
    pub kijun: usize,
    /// Senkou span B period, default 52, range [20,200].
    pub senkou: usize,
    /// Cloud displacement, default 26, range [10,100].
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self { enabled: false, tenkan: 9, kijun: 26, senkou: 52, displacement: 26 }
    }
}

impl IchimokuParams {
    fn clamped(self) -> Self {
        Self {
            tenkan: clamp_usize(self.tenkan, 5, 50),
            kijun: clamp_usize(self.kijun, 10, 100),
            senkou: clamp_usize(self.senkou, 20, 200),
            displacement: clamp_usize(self.displacement, 10, 100),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibParams {
    pub enabled: bool,
    /// Retracement window, default 20, range [5,100].
    pub period: usize,
}

impl Default for FibParams {
    fn default() -> Self {
        Self { enabled: false, period: 20 }
    }
}

impl FibParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 100), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CciParams {
    pub enabled: bool,
    /// Lookback period, default 20, range [5,50].
    pub period: usize,
}

impl Default for CciParams {
    fn default() -> Self {
        Self { enabled: false, period: 20 }
    }
}

impl CciParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 50), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaikinParams {
    pub enabled: bool,
    /// Fast EMA period, default 3, range [1,10].
    pub fast: usize,
    /// Slow EMA period, default 10, range [5,20].
    pub slow: usize,
}

impl Default for ChaikinParams {
    fn default() -> Self {
        Self { enabled: false, fast: 3, slow: 10 }
    }
}

impl ChaikinParams {
    fn clamped(self) -> Self {
        Self {
            fast: clamp_usize(self.fast, 1, 10),
            slow: clamp_usize(self.slow, 5, 20),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupertrendParams {
    pub enabled: bool,
    /// ATR period, default 10, range [5,50].
    pub period: usize,
    /// Band multiplier, default 3.0, range [1.0,10.0].
    pub multiplier: f64,
}

impl Default for SupertrendParams {
    fn default() -> Self {
        Self { enabled: false, period: 10, multiplier: 3.0 }
    }
}

impl SupertrendParams {
    fn clamped(self) -> Self {
        Self {
            period: clamp_usize(self.period, 5, 50),
            multiplier: clamp_f64(self.multiplier, 3.0, 1.0, 10.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsarParams {
    pub enabled: bool,
    /// Acceleration step, default 0.02, range [0.01,0.1].
    pub step: f64,
    /// Maximum acceleration, default 0.2, range [0.1,0.5].
    pub max: f64,
}

impl Default for PsarParams {
    fn default() -> Self {
        Self { enabled: false, step: 0.02, max: 0.2 }
    }
}

impl PsarParams {
    fn clamped(self) -> Self {
        Self {
            step: clamp_f64(self.step, 0.02, 0.01, 0.1),
            max: clamp_f64(self.max, 0.2, 0.1, 0.5),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZigZagParams {
    pub enabled: bool,
    /// Reversal threshold as a fraction, default 0.05, range [0.01,0.2].
    pub deviation: f64,
}

impl Default for ZigZagParams {
    fn default() -> Self {
        Self { enabled: false, deviation: 0.05 }
    }
}

impl ZigZagParams {
    fn clamped(self) -> Self {
        Self { deviation: clamp_f64(self.deviation, 0.05, 0.01, 0.2), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonchianParams {
    pub enabled: bool,
    /// Channel period, default 20, range [5,100].
    pub period: usize,
}

impl Default for DonchianParams {
    fn default() -> Self {
        Self { enabled: false, period: 20 }
    }
}

impl DonchianParams {
    fn clamped(self) -> Self {
        Self { period: clamp_usize(self.period, 5, 100), ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibBandsParams {
    pub enabled: bool,
    /// VWMA/ATR period, default 20, range [5,100].
    pub period: usize,
    /// Band multiplier, default 0.3, range [0.1,1.0].
    pub multiplier: f64,
}

impl Default for FibBandsParams {
    fn default() -> Self {
        Self { enabled: false, period: 20, multiplier: 0.3 }
    }
}

impl FibBandsParams {
    fn clamped(self) -> Self {
        Self {
            period: clamp_usize(self.period, 5, 100),
            multiplier: clamp_f64(self.multiplier, 0.3, 0.1, 1.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeParams {
    pub enabled: bool,
    /// SMA period, default 10, range [5,50].
    pub period: usize,
    /// Band offset as a fraction, default 0.005, range [0.001,0.05].
    pub deviation: f64,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self { enabled: false, period: 10, deviation: 0.005 }
    }
}

impl EnvelopeParams {
    fn clamped(self) -> Self {
        Self {
            period: clamp_usize(self.period, 5, 50),
            deviation: clamp_f64(self.deviation, 0.005, 0.001, 0.05),
            ..self
        }
    }
}

/// Full indicator configuration snapshot.
///
/// One section per indicator family. All families default to disabled;
/// enable the ones a given analysis should use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorConfig {
    pub rsi: RsiParams,
    pub stochastic: StochasticParams,
    pub macd: MacdParams,
    pub atr: AtrParams,
    pub ema: EmaParams,
    pub ma: MaParams,
    pub bollinger: BollingerParams,
    pub aroon: AroonParams,
    pub pivot: PivotParams,
    pub volume: VolumeParams,
    pub ichimoku: IchimokuParams,
    pub fib: FibParams,
    pub cci: CciParams,
    pub obv: Toggle,
    pub chaikin: ChaikinParams,
    pub supertrend: SupertrendParams,
    pub psar: PsarParams,
    pub fractals: Toggle,
    pub zigzag: ZigZagParams,
    pub heikin_ashi: Toggle,
    pub donchian: DonchianParams,
    pub fib_bands: FibBandsParams,
    pub envelope: EnvelopeParams,
}

impl IndicatorConfig {
    /// Normalize every parameter into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            rsi: self.rsi.clamped(),
            stochastic: self.stochastic.clamped(),
            macd: self.macd.clamped(),
            atr: self.atr.clamped(),
            ema: self.ema.clamped(),
            ma: self.ma.clamped(),
            bollinger: self.bollinger.clamped(),
            aroon: self.aroon.clamped(),
            pivot: self.pivot.clamped(),
            volume: self.volume.clamped(),
            ichimoku: self.ichimoku.clamped(),
            fib: self.fib.clamped(),
            cci: self.cci.clamped(),
            obv: self.obv,
            chaikin: self.chaikin.clamped(),
            supertrend: self.supertrend.clamped(),
            psar: self.psar.clamped(),
            fractals: self.fractals,
            zigzag: self.zigzag.clamped(),
            heikin_ashi: self.heikin_ashi,
            donchian: self.donchian.clamped(),
            fib_bands: self.fib_bands.clamped(),
            envelope: self.envelope.clamped(),
        }
    }

    /// Configuration with every family enabled at its default parameters.
    pub fn all_enabled() -> Self {
        Self {
            rsi: RsiParams { enabled: true, ..Default::default() },
            stochastic: StochasticParams { enabled: true, ..Default::default() },
            macd: MacdParams { enabled: true, ..Default::default() },
            atr: AtrParams { enabled: true, ..Default::default() },
            ema: EmaParams { enabled: true, ..Default::default() },
            ma: MaParams { enabled: true, ..Default::default() },
            bollinger: BollingerParams { enabled: true, ..Default::default() },
            aroon: AroonParams { enabled: true, ..Default::default() },
            pivot: PivotParams { enabled: true, ..Default::default() },
            volume: VolumeParams { enabled: true, ..Default::default() },
            ichimoku: IchimokuParams { enabled: true, ..Default::default() },
            fib: FibParams { enabled: true, ..Default::default() },
            cci: CciParams { enabled: true, ..Default::default() },
            obv: Toggle::on(),
            chaikin: ChaikinParams { enabled: true, ..Default::default() },
            supertrend: SupertrendParams { enabled: true, ..Default::default() },
            psar: PsarParams { enabled: true, ..Default::default() },
            fractals: Toggle::on(),
            zigzag: ZigZagParams { enabled: true, ..Default::default() },
            heikin_ashi: Toggle::on(),
            donchian: DonchianParams { enabled: true, ..Default::default() },
            fib_bands: FibBandsParams { enabled: true, ..Default::default() },
            envelope: EnvelopeParams { enabled: true, ..Default::default() },
        }
    }

    /// Longest period parameter across all enabled indicators, the
    /// engine-wide lookback requirement.
    pub fn max_lookback(&self) -> usize {
        [
            (self.rsi.enabled, self.rsi.period),
            (self.stochastic.enabled, self.stochastic.k),
            (self.macd.enabled, self.macd.slow),
            (self.atr.enabled, self.atr.period),
            (self.ema.enabled, self.ema.long),
            (self.ma.enabled, self.ma.period),
            (self.bollinger.enabled, self.bollinger.period),
            (self.aroon.enabled, self.aroon.period),
            (self.pivot.enabled, self.pivot.period),
            (self.volume.enabled, self.volume.period),
            (self.ichimoku.enabled, self.ichimoku.senkou),
            (self.fib.enabled, self.fib.period),
            (self.cci.enabled, self.cci.period),
            (self.supertrend.enabled, self.supertrend.period),
            (self.donchian.enabled, self.donchian.period),
            (self.fib_bands.enabled, self.fib_bands.period),
            (self.envelope.enabled, self.envelope.period),
        ]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, period)| *period)
        .max()
        .unwrap_or(0)
    }
}

/// Price-level derivation parameters: support/resistance lookback plus the
/// nine percentage knobs governing entry/stop/target offsets per tier.
///
/// Percentages are expressed in percent (1.0 means 1%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceLevelConfig {
    /// Support/resistance lookback window, default 20, range [5,100].
    pub lookback: usize,
    /// Buy stop-loss below entry, default 1.0%.
    pub stop_loss_buy: f64,
    /// Sell stop-loss below current price, default 0.5%.
    pub stop_loss_sell: f64,
    /// Very-weak-buy entry below support, default 1.0%.
    pub buy_very_weak_below_support: f64,
    /// Moderate-buy entry above support, default 0.5%.
    pub buy_moderate_above_support: f64,
    /// Strong-buy take-profit above current price, default 1.0%.
    pub buy_strong_above_current: f64,
    /// Strong-sell take-profit below current price, default 1.0%.
    pub sell_strong_below_current: f64,
    /// Moderate-sell entry above current price, default 0.5%.
    pub sell_moderate_above_current: f64,
    /// Very-weak-sell entry above resistance, default 1.0%.
    pub sell_very_weak_above_resistance: f64,
    /// Very-weak-sell re-entry below current price, default 1.0%.
    pub sell_very_weak_new_entry_below_current: f64,
}

impl Default for PriceLevelConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            stop_loss_buy: 1.0,
            stop_loss_sell: 0.5,
            buy_very_weak_below_support: 1.0,
            buy_moderate_above_support: 0.5,
            buy_strong_above_current: 1.0,
            sell_strong_below_current: 1.0,
            sell_moderate_above_current: 0.5,
            sell_very_weak_above_resistance: 1.0,
            sell_very_weak_new_entry_below_current: 1.0,
        }
    }
}

impl PriceLevelConfig {
    /// Normalize the lookback into [5,100] and every percentage into
    /// [0,100], substituting defaults for non-finite values.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            lookback: clamp_usize(self.lookback, 5, 100),
            stop_loss_buy: clamp_f64(self.stop_loss_buy, d.stop_loss_buy, 0.0, 100.0),
            stop_loss_sell: clamp_f64(self.stop_loss_sell, d.stop_loss_sell, 0.0, 100.0),
            buy_very_weak_below_support: clamp_f64(
                self.buy_very_weak_below_support,
                d.buy_very_weak_below_support,
                0.0,
                100.0,
            ),
            buy_moderate_above_support: clamp_f64(
                self.buy_moderate_above_support,
                d.buy_moderate_above_support,
                0.0,
                100.0,
            ),
            buy_strong_above_current: clamp_f64(
                self.buy_strong_above_current,
                d.buy_strong_above_current,
                0.0,
                100.0,
            ),
            sell_strong_below_current: clamp_f64(
                self.sell_strong_below_current,
                d.sell_strong_below_current,
                0.0,
                100.0,
            ),
            sell_moderate_above_current: clamp_f64(
                self.sell_moderate_above_current,
                d.sell_moderate_above_current,
                0.0,
                100.0,
            ),
            sell_very_weak_above_resistance: clamp_f64(
                self.sell_very_weak_above_resistance,
                d.sell_very_weak_above_resistance,
                0.0,
                100.0,
            ),
            sell_very_weak_new_entry_below_current: clamp_f64(
                self.sell_very_weak_new_entry_below_current,
                d.sell_very_weak_new_entry_below_current,
                0.0,
                100.0,
            ),
        }
    }
}

/// Trade sizing inputs for the profit/loss projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeParams {
    /// Position size in quote currency, default 1000.0, must be > 0.
    pub trade_size: f64,
    /// Exchange fee in percent per fill, default 0.0, must be >= 0.
    pub fee_percent: f64,
}

impl Default for TradeParams {
    fn default() -> Self {
        Self { trade_size: 1000.0, fee_percent: 0.0 }
    }
}

impl TradeParams {
    /// Replace out-of-domain values with defaults rather than failing.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let trade_size = if self.trade_size.is_finite() && self.trade_size > 0.0 {
            self.trade_size
        } else {
            warn!(trade_size = self.trade_size, "invalid trade size, using default");
            d.trade_size
        };
        let fee_percent = if self.fee_percent.is_finite() && self.fee_percent >= 0.0 {
            self.fee_percent
        } else {
            warn!(fee_percent = self.fee_percent, "invalid fee percent, using default");
            d.fee_percent
        };
        Self { trade_size, fee_percent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_clamping() {
        let cfg = IndicatorConfig {
            rsi: RsiParams { enabled: true, period: 500 },
            macd: MacdParams { enabled: true, fast: 1, slow: 500, signal: 9 },
            ..Default::default()
        }
        .clamped();
        assert_eq!(cfg.rsi.period, 50);
        assert_eq!(cfg.macd.fast, 5);
        assert_eq!(cfg.macd.slow, 100);
    }

    #[test]
    fn test_non_finite_float_falls_back_to_default() {
        let cfg = IndicatorConfig {
            bollinger: BollingerParams { enabled: true, period: 20, deviation: f64::NAN },
            ..Default::default()
        }
        .clamped();
        assert_eq!(cfg.bollinger.deviation, 2.0);
    }

    #[test]
    fn test_max_lookback_tracks_enabled_only() {
        let mut cfg = IndicatorConfig::default();
        assert_eq!(cfg.max_lookback(), 0);
        cfg.rsi.enabled = true;
        assert_eq!(cfg.max_lookback(), 14);
        cfg.ichimoku.enabled = true;
        assert_eq!(cfg.max_lookback(), 52);
    }

    #[test]
    fn test_trade_params_sanitized() {
        let t = TradeParams { trade_size: -5.0, fee_percent: f64::NAN }.sanitized();
        assert_eq!(t.trade_size, 1000.0);
        assert_eq!(t.fee_percent, 0.0);
    }

    #[test]
    fn test_price_level_lookback_clamp() {
        let cfg = PriceLevelConfig { lookback: 3, ..Default::default() }.clamped();
        assert_eq!(cfg.lookback, 5);
    }
}
