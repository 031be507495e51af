use serde::{Deserialize, Serialize};
use crate::cost::CostConfig;
use crate::tier::Tier;

/// Strategy applied to a tier, decided by the presence of a competitor price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    CostPlus,
    Undercut,
}

/// Resolved price for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPrice {
    pub mode: PricingMode,
    /// Per-unit price including GST
    pub final_price: f64,
    /// Pre-tax profit per unit
    pub profit: f64,
    pub effective_markup_percent: f64,
}

/// Round a currency amount to 2 decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Price a single tier given its per-unit cost.
///
/// Intermediate values are kept at full precision; only the returned figures are rounded.
pub fn price_for_tier(tier: &Tier, unit_cost: f64, cfg: &CostConfig) -> TierPrice {
    let (mode, final_price, profit) = match tier.undercut_target() {
        Some(competitor_price) => {
            let final_price = (competitor_price - cfg.undercut_amount).max(0.0);
            let pre_tax = final_price / cfg.gst_factor();
            (PricingMode::Undercut, final_price, pre_tax - unit_cost)
        }
        None => {
            let with_markup = unit_cost * (1.0 + cfg.markup_percent / 100.0);
            let discounted = with_markup * (1.0 - tier.discount / 100.0);
            let final_price = discounted * cfg.gst_factor();
            (PricingMode::CostPlus, final_price, discounted - unit_cost)
        }
    };

    let effective_markup_percent = if unit_cost > 0.0 {
        profit / unit_cost * 100.0
    } else {
        0.0
    };

    TierPrice {
        mode,
        final_price: round_currency(final_price),
        profit: round_currency(profit),
        effective_markup_percent: round_currency(effective_markup_percent),
    }
}
