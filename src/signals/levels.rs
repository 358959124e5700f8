//! Entry, target, stop and re-entry price derivation per signal tier.

use crate::signals::ta;
use crate::types::{
    candle::closes,
    levels::{format_opt_price, format_price, PRICE_FLOOR},
    Candle, PriceLevelConfig, PriceLevels, ProfitLoss, SignalDirection, SignalLabel, SignalTier,
    TradeParams,
};

/// Fallback volatility unit when ATR cannot be computed or is zero.
const DEFAULT_ATR: f64 = 0.01;

fn floored(price: f64) -> f64 {
    if price.is_finite() {
        price.max(PRICE_FLOOR)
    } else {
        PRICE_FLOOR
    }
}

/// Projected level with a window-extreme fallback: a support/resistance
/// projection that is missing, non-finite or non-positive is replaced by the
/// min (or max) close of the trailing window.
fn level_or_extreme(projection: Option<f64>, window: &[f64], upper: bool) -> f64 {
    let fallback = || {
        if upper {
            window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        } else {
            window.iter().copied().fold(f64::INFINITY, f64::min)
        }
    };
    let level = match projection {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => fallback(),
    };
    floored(level)
}

/// Derive entry/take-profit/stop-loss/re-entry prices for a signal.
///
/// Buy tiers ladder the entry from below support (Very Weak) up to the
/// current price (Strong); Sell tiers ladder the exit from the current price
/// (Strong) up past resistance (Very Weak), each with a re-entry candidate.
/// Hold produces only the current price. Every emitted price is floored at
/// 0.0001 and formatted to 8 decimals.
pub fn calculate_price_levels(
    candles: &[Candle],
    signal: SignalLabel,
    config: &PriceLevelConfig,
    trade: &TradeParams,
) -> PriceLevels {
    let config = config.clamped();
    let trade = trade.sanitized();

    let closes = closes(candles);
    let current = closes.last().copied().map_or(PRICE_FLOOR, floored);
    let window = &closes[closes.len().saturating_sub(config.lookback)..];

    let atr = ta::atr(candles, 14)
        .last()
        .copied()
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(DEFAULT_ATR);
    let support = level_or_extreme(ta::support_line(&closes, config.lookback), window, false);
    let resistance = level_or_extreme(ta::resistance_line(&closes, config.lookback), window, true);

    let pct = |p: f64| p / 100.0;

    let (entry, take_profit, stop_loss, potential_entry) = match (signal.direction(), signal.tier())
    {
        (SignalDirection::Buy, Some(tier)) => {
            let entry = match tier {
                SignalTier::VeryWeak => {
                    support * (1.0 - pct(config.buy_very_weak_below_support).min(0.9999))
                }
                SignalTier::Weak => support,
                SignalTier::Moderate => support * (1.0 + pct(config.buy_moderate_above_support)),
                SignalTier::Strong => current,
            };
            let entry = floored(entry);
            let take_profit = match tier {
                SignalTier::Strong => current * (1.0 + pct(config.buy_strong_above_current)),
                _ => entry + 3.0 * atr,
            };
            let stop_loss = (entry * (1.0 - pct(config.stop_loss_buy))).min(entry);
            (entry, Some(floored(take_profit)), Some(floored(stop_loss)), None)
        }
        (SignalDirection::Sell, Some(tier)) => {
            let (entry, potential) = match tier {
                SignalTier::Strong => (
                    current,
                    support * (1.0 - pct(config.buy_very_weak_below_support).min(0.9999)),
                ),
                SignalTier::Moderate => {
                    (current * (1.0 + pct(config.sell_moderate_above_current)), support)
                }
                SignalTier::Weak => {
                    (resistance, support * (1.0 + pct(config.buy_moderate_above_support)))
                }
                SignalTier::VeryWeak => (
                    resistance * (1.0 + pct(config.sell_very_weak_above_resistance)),
                    current * (1.0 - pct(config.sell_very_weak_new_entry_below_current)),
                ),
            };
            let entry = floored(entry);
            // Strong sells exit below the current price; the other tiers exit
            // at their (raised) entry level.
            let take_profit = match tier {
                SignalTier::Strong => current * (1.0 - pct(config.sell_strong_below_current)),
                _ => entry,
            };
            let stop_loss = (current * (1.0 - pct(config.stop_loss_sell))).min(entry);
            (entry, Some(floored(take_profit)), Some(floored(stop_loss)), Some(floored(potential)))
        }
        _ => (current, None, None, None),
    };

    let risk_reward_ratio = match (take_profit, stop_loss) {
        (Some(tp), Some(sl)) if entry != sl => {
            format!("{:.2}", (tp - entry).abs() / (entry - sl).abs())
        }
        _ => "N/A".to_string(),
    };

    let profit_loss = profit_loss(
        signal.direction(),
        entry,
        current,
        take_profit,
        stop_loss,
        potential_entry,
        &trade,
    );

    PriceLevels {
        entry_price: format_price(entry),
        take_profit: format_opt_price(take_profit),
        stop_loss: format_opt_price(stop_loss),
        potential_entry_price: format_opt_price(potential_entry),
        risk_reward_ratio,
        support_price: format_price(support),
        resistance_price: format_price(resistance),
        profit_loss,
        signal,
    }
}

/// Quote-currency outcome projection. Buys project both target and stop
/// fills; Sells project only the markdown to the re-entry price. Fees are
/// charged on both fills.
fn profit_loss(
    direction: SignalDirection,
    entry: f64,
    current: f64,
    take_profit: Option<f64>,
    stop_loss: Option<f64>,
    potential_entry: Option<f64>,
    trade: &TradeParams,
) -> Option<ProfitLoss> {
    let size = trade.trade_size;
    let fee = size * trade.fee_percent / 100.0;

    match direction {
        SignalDirection::Buy => {
            let (tp, sl) = (take_profit?, stop_loss?);
            let tokens = size / entry;
            let profit = tokens * tp - size - 2.0 * fee;
            let loss = tokens * sl - size - 2.0 * fee;
            Some(ProfitLoss {
                profit: Some(format!("{profit:.2}")),
                loss: format!("{loss:.2}"),
                profit_percent: Some(format!("{:.2}", profit / size * 100.0)),
                loss_percent: format!("{:.2}", loss / size * 100.0),
            })
        }
        SignalDirection::Sell => {
            let potential = potential_entry?;
            let tokens_held = size / current;
            let loss = tokens_held * potential - size - 2.0 * fee;
            Some(ProfitLoss {
                profit: None,
                loss: format!("{loss:.2}"),
                profit_percent: None,
                loss_percent: format!("{:.2}", loss / size * 100.0),
            })
        }
        SignalDirection::Hold => None,
    }
}
