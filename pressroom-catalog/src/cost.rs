use serde::{Deserialize, Serialize};
use crate::tier::Tier;

/// Cost and strategy inputs authored alongside a tier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Manufacturing cost per unit of area, before material/finish multipliers
    pub base_rate_per_area_unit: f64,

    /// One-time setup cost, spread over a tier's minimum quantity
    pub setup_fee: f64,

    /// Per-unit packaging folded into unit cost (separate from the order-level surcharge)
    pub packaging_cost_per_unit: f64,

    pub gst_rate_percent: f64,

    pub markup_percent: f64,

    /// Amount subtracted from a competitor's price in undercut mode
    pub undercut_amount: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            base_rate_per_area_unit: 0.5,
            setup_fee: 200.0,
            packaging_cost_per_unit: 0.25,
            gst_rate_percent: 18.0,
            markup_percent: 60.0,
            undercut_amount: 1.0,
        }
    }
}

impl CostConfig {
    /// Fields holding a negative value, by name.
    pub fn negative_fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("base_rate_per_area_unit", self.base_rate_per_area_unit),
            ("setup_fee", self.setup_fee),
            ("packaging_cost_per_unit", self.packaging_cost_per_unit),
            ("gst_rate_percent", self.gst_rate_percent),
            ("markup_percent", self.markup_percent),
            ("undercut_amount", self.undercut_amount),
        ]
        .into_iter()
        .filter(|(_, value)| *value < 0.0)
        .collect()
    }

    pub(crate) fn gst_factor(&self) -> f64 {
        1.0 + self.gst_rate_percent / 100.0
    }
}

/// Per-unit cost components for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub area: f64,
    pub base_mfg_cost: f64,
    pub packaging_cost: f64,
    pub amortized_setup: f64,
    pub total_unit_cost: f64,
}

/// Break down the per-unit manufacturing cost of a tier.
///
/// Setup is amortized over `tier.min`, not the ordered quantity, so the figure
/// is exact at the tier's minimum and overstated above it.
pub fn cost_breakdown(
    tier: &Tier,
    width: f64,
    height: f64,
    material_multiplier: f64,
    finish_multiplier: f64,
    cfg: &CostConfig,
) -> CostBreakdown {
    let area = width * height;
    let base_mfg_cost = area * cfg.base_rate_per_area_unit * material_multiplier * finish_multiplier;
    let amortized_setup = cfg.setup_fee / f64::from(tier.min);
    let total_unit_cost = base_mfg_cost + cfg.packaging_cost_per_unit + amortized_setup;

    CostBreakdown {
        area,
        base_mfg_cost,
        packaging_cost: cfg.packaging_cost_per_unit,
        amortized_setup,
        total_unit_cost,
    }
}

pub fn unit_cost(
    tier: &Tier,
    width: f64,
    height: f64,
    material_multiplier: f64,
    finish_multiplier: f64,
    cfg: &CostConfig,
) -> f64 {
    cost_breakdown(tier, width, height, material_multiplier, finish_multiplier, cfg).total_unit_cost
}
