use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;
use crate::cost::{cost_breakdown, CostBreakdown, CostConfig};
use crate::options::ItemOption;
use crate::pricing::{price_for_tier, PricingMode, TierPrice};
use crate::tier::TierTable;

/// Most sizes a single range request may generate
pub const MAX_RANGE_SPAN: u32 = 500;

/// One row of a persisted price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantTier {
    pub min: u32,
    pub max: u32,
    pub price: f64,
}

/// A size-specific price table, ready for storefront consumption.
/// Replaced wholesale when regenerated, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub id: Uuid,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub tiers: Vec<VariantTier>,
}

impl SizeVariant {
    /// Deterministic name for a pair of dimensions, e.g. `3x3` or `2.5x4`.
    pub fn name_for(width: f64, height: f64) -> String {
        format!("{}x{}", width, height)
    }

    /// Stable id derived from the variant name, so regenerating a size targets the same record.
    pub fn id_for(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
    }
}

/// Authoring-side detail for one tier; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBreakdown {
    pub min: u32,
    pub max: u32,
    pub cost: CostBreakdown,
    pub price: TierPrice,
}

/// Conditions the operator should see; none of them block generation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    NegativeConfigValue { field: &'static str, value: f64 },
    NonPositiveDimensions { width: f64, height: f64 },
    NonPositiveCost { tier_min: u32, unit_cost: f64 },
    Loss { tier_min: u32, mode: PricingMode, profit: f64 },
}

impl std::fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingWarning::NegativeConfigValue { field, value } => {
                write!(f, "{} is negative ({})", field, value)
            }
            PricingWarning::NonPositiveDimensions { width, height } => {
                write!(f, "dimensions {}x{} are not positive", width, height)
            }
            PricingWarning::NonPositiveCost { tier_min, unit_cost } => {
                write!(f, "tier starting at {} has unit cost {}", tier_min, unit_cost)
            }
            PricingWarning::Loss { tier_min, mode, profit } => {
                write!(f, "tier starting at {} sells at a loss ({:?}, profit {})", tier_min, mode, profit)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantReport {
    pub variant: SizeVariant,
    pub breakdown: Vec<TierBreakdown>,
    pub warnings: Vec<PricingWarning>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeOutcome {
    pub created: Vec<SizeVariant>,
    /// Names that already existed and were left untouched
    pub skipped: Vec<String>,
}

/// Drives the cost model and pricing strategy across sizes
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    config: CostConfig,
}

impl VariantGenerator {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    pub fn generate(
        &self,
        width: f64,
        height: f64,
        tiers: &TierTable,
        material: &ItemOption,
        finish: &ItemOption,
    ) -> SizeVariant {
        self.generate_report(width, height, tiers, material, finish).variant
    }

    /// Generate a variant together with the per-tier figures and warnings behind it.
    pub fn generate_report(
        &self,
        width: f64,
        height: f64,
        tiers: &TierTable,
        material: &ItemOption,
        finish: &ItemOption,
    ) -> VariantReport {
        let mut warnings: Vec<PricingWarning> = self
            .config
            .negative_fields()
            .into_iter()
            .map(|(field, value)| PricingWarning::NegativeConfigValue { field, value })
            .collect();

        if width <= 0.0 || height <= 0.0 {
            warnings.push(PricingWarning::NonPositiveDimensions { width, height });
        }

        let mut breakdown = Vec::with_capacity(tiers.len());
        for tier in tiers.iter() {
            let cost = cost_breakdown(
                tier,
                width,
                height,
                material.multiplier,
                finish.multiplier,
                &self.config,
            );
            let price = price_for_tier(tier, cost.total_unit_cost, &self.config);

            if cost.total_unit_cost <= 0.0 {
                warnings.push(PricingWarning::NonPositiveCost {
                    tier_min: tier.min,
                    unit_cost: cost.total_unit_cost,
                });
            }
            if price.profit <= 0.0 {
                warnings.push(PricingWarning::Loss {
                    tier_min: tier.min,
                    mode: price.mode,
                    profit: price.profit,
                });
            }

            breakdown.push(TierBreakdown {
                min: tier.min,
                max: tier.max,
                cost,
                price,
            });
        }

        let name = SizeVariant::name_for(width, height);
        let variant = SizeVariant {
            id: SizeVariant::id_for(&name),
            name,
            width,
            height,
            tiers: breakdown
                .iter()
                .map(|row| VariantTier {
                    min: row.min,
                    max: row.max,
                    price: row.price.final_price,
                })
                .collect(),
        };

        VariantReport {
            variant,
            breakdown,
            warnings,
        }
    }

    /// Generate one square variant per integer size in `[min_size, max_size]`,
    /// skipping any whose name is already in `existing_names`.
    pub fn generate_range<S: AsRef<str>>(
        &self,
        min_size: u32,
        max_size: u32,
        existing_names: &[S],
        tiers: &TierTable,
        material: &ItemOption,
        finish: &ItemOption,
    ) -> Result<RangeOutcome, GenerationError> {
        if min_size == 0 || min_size > max_size {
            return Err(GenerationError::InvalidSizeRange { min_size, max_size });
        }
        if max_size - min_size >= MAX_RANGE_SPAN {
            return Err(GenerationError::RangeTooLarge {
                min_size,
                max_size,
                limit: MAX_RANGE_SPAN,
            });
        }

        let existing: HashSet<&str> = existing_names.iter().map(|n| n.as_ref()).collect();
        let mut outcome = RangeOutcome::default();

        for size in min_size..=max_size {
            let side = f64::from(size);
            let name = SizeVariant::name_for(side, side);
            if existing.contains(name.as_str()) {
                tracing::debug!("Skipping existing variant {}", name);
                outcome.skipped.push(name);
                continue;
            }
            outcome.created.push(self.generate(side, side, tiers, material, finish));
        }

        Ok(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid size range {min_size}..={max_size}")]
    InvalidSizeRange { min_size: u32, max_size: u32 },

    #[error("Size range {min_size}..={max_size} exceeds {limit} sizes")]
    RangeTooLarge { min_size: u32, max_size: u32, limit: u32 },
}
