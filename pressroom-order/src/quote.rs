use serde::{Deserialize, Serialize};
use pressroom_catalog::pricing::round_currency;
use pressroom_catalog::{SizeVariant, VariantTier};

/// Runtime projection of a variant tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_qty: u32,
    /// `None` marks an open-ended top tier
    pub max_qty: Option<u32>,
    pub price_per_unit: f64,
}

impl PricingTier {
    pub fn new(min_qty: u32, max_qty: Option<u32>, price_per_unit: f64) -> Self {
        Self {
            min_qty,
            max_qty,
            price_per_unit,
        }
    }

    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }
}

impl From<&VariantTier> for PricingTier {
    fn from(tier: &VariantTier) -> Self {
        Self {
            min_qty: tier.min,
            max_qty: Some(tier.max),
            price_per_unit: tier.price,
        }
    }
}

/// Project a persisted variant into the runtime lookup shape.
pub fn pricing_tiers(variant: &SizeVariant) -> Vec<PricingTier> {
    variant.tiers.iter().map(PricingTier::from).collect()
}

/// Check a tier table before pricing from it: finite non-negative prices,
/// `min_qty >= 1`, `max >= min`, sorted without overlap, open-ended tier last.
pub fn check_tiers(tiers: &[PricingTier]) -> Result<(), String> {
    for (index, tier) in tiers.iter().enumerate() {
        if !tier.price_per_unit.is_finite() || tier.price_per_unit < 0.0 {
            return Err(format!("tier {} has price {}", index, tier.price_per_unit));
        }
        if tier.min_qty == 0 {
            return Err(format!("tier {} starts at 0", index));
        }
        if tier.max_qty.is_some_and(|max| max < tier.min_qty) {
            return Err(format!("tier {} has max below min", index));
        }
    }

    for (index, pair) in tiers.windows(2).enumerate() {
        match pair[0].max_qty {
            Some(prev_max) if pair[1].min_qty > prev_max => {}
            _ => {
                return Err(format!(
                    "tier {} overlaps or precedes tier {}",
                    index + 1,
                    index
                ))
            }
        }
    }

    Ok(())
}

/// Table used when a product has no tier data of its own.
pub fn default_pricing_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier::new(1, Some(99), 10.0),
        PricingTier::new(100, Some(499), 8.0),
        PricingTier::new(500, Some(999), 6.0),
        PricingTier::new(1000, Some(4999), 5.0),
        PricingTier::new(5000, None, 4.0),
    ]
}

/// Order-level packaging surcharge, independent of the per-unit packaging in the cost model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingConfig {
    pub base_box_cost: f64,
    pub extra_padding_cost: f64,
    pub units_per_padding: u32,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            base_box_cost: 50.0,
            extra_padding_cost: 25.0,
            units_per_padding: 100,
        }
    }
}

impl PackagingConfig {
    pub fn cost_for(&self, quantity: u32) -> f64 {
        let paddings = quantity.div_ceil(self.units_per_padding.max(1));
        self.base_box_cost + f64::from(paddings) * self.extra_padding_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub unit_price: f64,
    pub subtotal: f64,
    pub packaging_cost: f64,
    pub final_price: f64,
}

/// Resolves live quantities against a tier table
#[derive(Debug, Clone)]
pub struct Quoter {
    packaging: PackagingConfig,
    fallback: Vec<PricingTier>,
}

impl Default for Quoter {
    fn default() -> Self {
        Self::new(PackagingConfig::default())
    }
}

impl Quoter {
    pub fn new(packaging: PackagingConfig) -> Self {
        Self {
            packaging,
            fallback: default_pricing_tiers(),
        }
    }

    pub fn packaging(&self) -> &PackagingConfig {
        &self.packaging
    }

    /// Tier table actually used for a lookup: the given one, or the default when missing or empty.
    pub fn resolve_tiers<'a>(&'a self, tiers: Option<&'a [PricingTier]>) -> &'a [PricingTier] {
        match tiers {
            Some(tiers) if !tiers.is_empty() => tiers,
            _ => &self.fallback,
        }
    }

    /// Unit price for a quantity. Total for any non-empty table: above the
    /// top tier the last price applies, inside a gap the nearest lower tier.
    pub fn unit_price(&self, quantity: u32, tiers: Option<&[PricingTier]>) -> f64 {
        let tiers = self.resolve_tiers(tiers);

        if let Some(tier) = tiers.iter().find(|t| t.contains(quantity)) {
            return tier.price_per_unit;
        }

        tiers
            .iter()
            .rev()
            .find(|t| t.min_qty <= quantity)
            .or_else(|| tiers.first())
            .map_or(0.0, |t| t.price_per_unit)
    }

    /// Callers pass tables that have been through `check_tiers`.
    /// The subtotal is charged on the rounded unit price the customer sees.
    pub fn quote(&self, quantity: u32, tiers: Option<&[PricingTier]>) -> Quote {
        let unit_price = round_currency(self.unit_price(quantity, tiers));
        let subtotal = round_currency(unit_price * f64::from(quantity));
        let packaging_cost = round_currency(self.packaging.cost_for(quantity));

        Quote {
            unit_price,
            subtotal,
            packaging_cost,
            final_price: round_currency(subtotal + packaging_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_150_units() {
        let quote = Quoter::default().quote(150, None);

        assert_eq!(quote.unit_price, 8.0);
        assert_eq!(quote.subtotal, 1200.0);
        assert_eq!(quote.packaging_cost, 100.0);
        assert_eq!(quote.final_price, 1300.0);
    }

    #[test]
    fn test_quote_50_units() {
        let tiers = default_pricing_tiers();
        let quote = Quoter::default().quote(50, Some(tiers.as_slice()));

        assert_eq!(quote.unit_price, 10.0);
        assert_eq!(quote.subtotal, 500.0);
        assert_eq!(quote.packaging_cost, 75.0);
        assert_eq!(quote.final_price, 575.0);
    }

    #[test]
    fn test_empty_table_falls_back_to_default() {
        let quoter = Quoter::default();
        assert_eq!(quoter.quote(150, Some(Vec::new().as_slice())), quoter.quote(150, None));
    }

    #[test]
    fn test_open_ended_top_tier() {
        let quote = Quoter::default().quote(10_000, None);

        assert_eq!(quote.unit_price, 4.0);
        assert_eq!(quote.packaging_cost, 50.0 + 100.0 * 25.0);
        assert_eq!(quote.final_price, 42_550.0);
    }

    #[test]
    fn test_above_last_finite_tier_uses_last_price() {
        let tiers = vec![PricingTier::new(1, Some(10), 5.0), PricingTier::new(11, Some(20), 4.0)];
        let quoter = Quoter::default();

        assert_eq!(quoter.unit_price(50, Some(tiers.as_slice())), 4.0);
    }

    #[test]
    fn test_gap_and_below_first_tier() {
        let tiers = vec![PricingTier::new(10, Some(20), 5.0), PricingTier::new(50, Some(90), 3.0)];
        let quoter = Quoter::default();

        assert_eq!(quoter.unit_price(30, Some(tiers.as_slice())), 5.0);
        assert_eq!(quoter.unit_price(3, Some(tiers.as_slice())), 5.0);
    }

    #[test]
    fn test_subtotal_uses_rounded_unit_price() {
        let tiers = vec![PricingTier::new(1, None, 0.125)];
        let quote = Quoter::default().quote(100, Some(tiers.as_slice()));

        assert_eq!(quote.unit_price, 0.13);
        assert_eq!(quote.subtotal, 13.0);
        assert_eq!(quote.final_price, 88.0);
    }

    #[test]
    fn test_check_tiers() {
        assert!(check_tiers(&default_pricing_tiers()).is_ok());
        assert!(check_tiers(&[]).is_ok());

        let negative = vec![PricingTier::new(1, Some(99), -20.0)];
        assert!(check_tiers(&negative).is_err());

        let overlapping = vec![PricingTier::new(1, Some(10), 5.0), PricingTier::new(5, Some(20), 4.0)];
        assert!(check_tiers(&overlapping).is_err());

        let unsorted = vec![PricingTier::new(50, Some(99), 4.0), PricingTier::new(1, Some(49), 5.0)];
        assert!(check_tiers(&unsorted).is_err());

        let open_middle = vec![PricingTier::new(1, None, 5.0), PricingTier::new(50, Some(99), 4.0)];
        assert!(check_tiers(&open_middle).is_err());
    }

    #[test]
    fn test_packaging_boundaries() {
        let packaging = PackagingConfig::default();

        assert_eq!(packaging.cost_for(1), 75.0);
        assert_eq!(packaging.cost_for(100), 75.0);
        assert_eq!(packaging.cost_for(101), 100.0);
    }

    #[test]
    fn test_projection_from_variant() {
        let variant = SizeVariant {
            id: SizeVariant::id_for("3x3"),
            name: "3x3".to_string(),
            width: 3.0,
            height: 3.0,
            tiers: vec![
                VariantTier { min: 1, max: 49, price: 2.5 },
                VariantTier { min: 50, max: 99, price: 2.0 },
            ],
        };

        let tiers = pricing_tiers(&variant);
        assert_eq!(tiers[1], PricingTier::new(50, Some(99), 2.0));

        let quote = Quoter::default().quote(60, Some(tiers.as_slice()));
        assert_eq!(quote.subtotal, 120.0);
        assert_eq!(quote.final_price, 195.0);
    }
}
