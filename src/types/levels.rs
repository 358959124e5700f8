use serde::{Deserialize, Serialize};

use crate::types::signals::SignalLabel;

/// Smallest price the calculator will ever emit.
pub const PRICE_FLOOR: f64 = 0.0001;

/// Format a price to 8 decimal fixed-point, flooring at [`PRICE_FLOOR`].
pub fn format_price(price: f64) -> String {
    format!("{:.8}", price.max(PRICE_FLOOR))
}

/// Format an optional price, "N/A" when absent.
pub fn format_opt_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format_price(p),
        None => "N/A".to_string(),
    }
}

/// Profit/loss projection for the configured trade size.
///
/// Buy signals project both the take-profit and stop-loss outcomes; Sell
/// signals only project the loss of holding down to the potential re-entry
/// price. Amounts are in quote currency, percentages relative to trade size,
/// both formatted to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<String>,
    pub loss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_percent: Option<String>,
    pub loss_percent: String,
}

/// Derived price levels for one signal.
///
/// All prices are 8-decimal fixed-point strings floored at 0.0001; fields
/// that do not apply to the signal hold "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevels {
    pub entry_price: String,
    pub take_profit: String,
    pub stop_loss: String,
    /// Re-entry candidate after a Sell, "N/A" for Buy and Hold.
    pub potential_entry_price: String,
    /// |takeProfit-entry| / |entry-stopLoss| to 2 decimals, or "N/A".
    pub risk_reward_ratio: String,
    pub support_price: String,
    pub resistance_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<ProfitLoss>,
    /// The signal label these levels were derived for.
    pub signal: SignalLabel,
}
