use serde::{Deserialize, Serialize};

use crate::types::levels::PriceLevels;

/// Direction component of a trading signal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Buy,
    Sell,
    Hold,
}

/// Strength tier of a non-Hold signal. "Very Weak" is the only two-word tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalTier {
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

/// Discrete trading signal label derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalLabel {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Moderate Buy")]
    ModerateBuy,
    #[serde(rename = "Weak Buy")]
    WeakBuy,
    #[serde(rename = "Very Weak Buy")]
    VeryWeakBuy,
    #[serde(rename = "Strong Sell")]
    StrongSell,
    #[serde(rename = "Moderate Sell")]
    ModerateSell,
    #[serde(rename = "Weak Sell")]
    WeakSell,
    #[serde(rename = "Very Weak Sell")]
    VeryWeakSell,
    Hold,
}

impl SignalLabel {
    /// Map a composite score to a label. Thresholds are checked in
    /// declaration order; the first match wins.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            SignalLabel::StrongBuy
        } else if score >= 0.55 {
            SignalLabel::ModerateBuy
        } else if score >= 0.3 {
            SignalLabel::WeakBuy
        } else if score >= 0.1 {
            SignalLabel::VeryWeakBuy
        } else if score <= -0.85 {
            SignalLabel::StrongSell
        } else if score <= -0.55 {
            SignalLabel::ModerateSell
        } else if score <= -0.3 {
            SignalLabel::WeakSell
        } else if score <= -0.1 {
            SignalLabel::VeryWeakSell
        } else {
            SignalLabel::Hold
        }
    }

    /// Display label, e.g. "Very Weak Buy".
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "Strong Buy",
            SignalLabel::ModerateBuy => "Moderate Buy",
            SignalLabel::WeakBuy => "Weak Buy",
            SignalLabel::VeryWeakBuy => "Very Weak Buy",
            SignalLabel::StrongSell => "Strong Sell",
            SignalLabel::ModerateSell => "Moderate Sell",
            SignalLabel::WeakSell => "Weak Sell",
            SignalLabel::VeryWeakSell => "Very Weak Sell",
            SignalLabel::Hold => "Hold",
        }
    }

    pub fn direction(&self) -> SignalDirection {
        match self {
            SignalLabel::StrongBuy
            | SignalLabel::ModerateBuy
            | SignalLabel::WeakBuy
            | SignalLabel::VeryWeakBuy => SignalDirection::Buy,
            SignalLabel::StrongSell
            | SignalLabel::ModerateSell
            | SignalLabel::WeakSell
            | SignalLabel::VeryWeakSell => SignalDirection::Sell,
            SignalLabel::Hold => SignalDirection::Hold,
        }
    }

    pub fn tier(&self) -> Option<SignalTier> {
        match self {
            SignalLabel::StrongBuy | SignalLabel::StrongSell => Some(SignalTier::Strong),
            SignalLabel::ModerateBuy | SignalLabel::ModerateSell => Some(SignalTier::Moderate),
            SignalLabel::WeakBuy | SignalLabel::WeakSell => Some(SignalTier::Weak),
            SignalLabel::VeryWeakBuy | SignalLabel::VeryWeakSell => Some(SignalTier::VeryWeak),
            SignalLabel::Hold => None,
        }
    }

    /// Parse a display label back into a `SignalLabel` by splitting on
    /// whitespace: the last token is the direction, the leading token(s) the
    /// tier. Unrecognized text falls back to Hold, matching the lenient
    /// behavior callers rely on when restoring cached results.
    pub fn parse(label: &str) -> Self {
        let parts: Vec<&str> = label.split_whitespace().collect();
        if parts.len() < 2 {
            return SignalLabel::Hold;
        }
        let tier = if parts[0] == "Very" {
            format!("{} {}", parts[0], parts[1])
        } else {
            parts[0].to_string()
        };
        let direction = parts[parts.len() - 1];
        match (tier.as_str(), direction) {
            ("Strong", "Buy") => SignalLabel::StrongBuy,
            ("Moderate", "Buy") => SignalLabel::ModerateBuy,
            ("Weak", "Buy") => SignalLabel::WeakBuy,
            ("Very Weak", "Buy") => SignalLabel::VeryWeakBuy,
            ("Strong", "Sell") => SignalLabel::StrongSell,
            ("Moderate", "Sell") => SignalLabel::ModerateSell,
            ("Weak", "Sell") => SignalLabel::WeakSell,
            ("Very Weak", "Sell") => SignalLabel::VeryWeakSell,
            _ => SignalLabel::Hold,
        }
    }
}

/// Scored output of a single technical indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    /// Indicator name (e.g. "RSI", "Bollinger Bands").
    pub name: String,
    /// Directional vote in {-1, -0.5, 0, 0.5, 1}.
    pub signal: f64,
    /// Confidence weight in [0,1].
    pub strength: f64,
    /// Human-readable summary, e.g. "RSI: 28.40 (Oversold)".
    pub display: String,
}

impl IndicatorResult {
    /// Neutral stub used when an indicator cannot be computed; it still
    /// occupies a slot in the batch so the caller sees why it is silent.
    pub fn neutral(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            signal: 0.0,
            strength: 0.0,
            display: format!("{}: {}", name, reason),
        }
    }
}

/// Winning pattern from one detector call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    /// Directional vote in [-1,1].
    pub signal: f64,
    /// Confidence weight in [0,1].
    pub strength: f64,
    /// Pattern label, "None" when nothing matched.
    pub pattern: String,
}

impl PatternResult {
    pub fn none() -> Self {
        Self { signal: 0.0, strength: 0.0, pattern: "None".to_string() }
    }
}

/// One line of the per-component score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    pub name: String,
    /// This component's weighted contribution to the composite score.
    pub score: f64,
    /// Pattern label or direction word.
    pub details: String,
    pub display: String,
}

/// Component weights selected from the trend strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentWeights {
    pub candle: f64,
    pub chart: f64,
    pub indicators: f64,
}

/// Unweighted component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScores {
    pub candle: f64,
    pub chart: f64,
    pub indicators: f64,
}

/// Pattern name and strength as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub pattern: String,
    pub strength: f64,
}

/// Per-indicator direction and strength as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub name: String,
    /// "Bullish", "Bearish", or "Neutral".
    pub signal: String,
    pub strength: f64,
}

/// Diagnostic breakdown of how the composite score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBreakdown {
    /// |Aroon oscillator(25)| over the close series, range [0,100].
    pub trend_strength: f64,
    pub weights: ComponentWeights,
    pub raw_scores: RawScores,
    pub candlestick: PatternSummary,
    pub chart: PatternSummary,
    pub indicators: Vec<IndicatorSummary>,
}

/// Complete output of one signal-generation call.
///
/// An immutable snapshot: callers may cache it as "last computed state" and
/// later restore or re-render it, the core itself holds nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalResult {
    pub signal: SignalLabel,
    pub composite_score: f64,
    pub component_scores: Vec<ComponentScore>,
    pub price_levels: PriceLevels,
    pub details: SignalBreakdown,
    /// Unix milliseconds when the signal was computed.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(SignalLabel::from_score(0.9), SignalLabel::StrongBuy);
        assert_eq!(SignalLabel::from_score(0.85), SignalLabel::StrongBuy);
        assert_eq!(SignalLabel::from_score(0.6), SignalLabel::ModerateBuy);
        assert_eq!(SignalLabel::from_score(0.3), SignalLabel::WeakBuy);
        assert_eq!(SignalLabel::from_score(0.1), SignalLabel::VeryWeakBuy);
        assert_eq!(SignalLabel::from_score(0.0), SignalLabel::Hold);
        assert_eq!(SignalLabel::from_score(-0.05), SignalLabel::Hold);
        assert_eq!(SignalLabel::from_score(-0.1), SignalLabel::VeryWeakSell);
        assert_eq!(SignalLabel::from_score(-0.3), SignalLabel::WeakSell);
        assert_eq!(SignalLabel::from_score(-0.6), SignalLabel::ModerateSell);
        assert_eq!(SignalLabel::from_score(-0.9), SignalLabel::StrongSell);
    }

    #[test]
    fn test_parse_round_trips_every_label() {
        for label in [
            SignalLabel::StrongBuy,
            SignalLabel::ModerateBuy,
            SignalLabel::WeakBuy,
            SignalLabel::VeryWeakBuy,
            SignalLabel::StrongSell,
            SignalLabel::ModerateSell,
            SignalLabel::WeakSell,
            SignalLabel::VeryWeakSell,
            SignalLabel::Hold,
        ] {
            assert_eq!(SignalLabel::parse(label.label()), label);
        }
    }

    #[test]
    fn test_parse_garbage_is_hold() {
        assert_eq!(SignalLabel::parse(""), SignalLabel::Hold);
        assert_eq!(SignalLabel::parse("Buy"), SignalLabel::Hold);
        assert_eq!(SignalLabel::parse("Mega Buy"), SignalLabel::Hold);
    }

    #[test]
    fn test_direction_and_tier() {
        assert_eq!(SignalLabel::VeryWeakSell.direction(), SignalDirection::Sell);
        assert_eq!(SignalLabel::VeryWeakSell.tier(), Some(SignalTier::VeryWeak));
        assert_eq!(SignalLabel::Hold.tier(), None);
    }

    #[test]
    fn test_label_serializes_as_display_string() {
        let json = serde_json::to_string(&SignalLabel::VeryWeakBuy).unwrap();
        assert_eq!(json, "\"Very Weak Buy\"");
    }
}
