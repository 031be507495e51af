use serde::{Deserialize, Serialize};

/// A quantity breakpoint as authored by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub min: u32,
    pub max: u32,

    /// Percentage taken off the marked-up price (cost-plus mode only)
    #[serde(default)]
    pub discount: f64,

    /// Manually entered competitor unit price; switches the tier to undercut mode when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_price: Option<f64>,
}

impl Tier {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            discount: 0.0,
            competitor_price: None,
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_competitor_price(mut self, price: f64) -> Self {
        self.competitor_price = Some(price);
        self
    }

    /// Competitor price if it is set and positive.
    pub fn undercut_target(&self) -> Option<f64> {
        self.competitor_price.filter(|p| *p > 0.0)
    }
}

/// Sorted, non-overlapping list of tiers. The only form in which tiers reach the generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        for (index, tier) in tiers.iter().enumerate() {
            if tier.min == 0 {
                return Err(TierTableError::ZeroMinimum { index });
            }
            if tier.max < tier.min {
                return Err(TierTableError::InvertedRange {
                    index,
                    min: tier.min,
                    max: tier.max,
                });
            }
            if !tier.discount.is_finite() || !(0.0..=100.0).contains(&tier.discount) {
                return Err(TierTableError::InvalidDiscount {
                    index,
                    discount: tier.discount,
                });
            }
            if let Some(price) = tier.competitor_price {
                if !price.is_finite() || price < 0.0 {
                    return Err(TierTableError::InvalidCompetitorPrice { index, price });
                }
            }
        }

        for (index, pair) in tiers.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min < prev.min {
                return Err(TierTableError::Unsorted { index: index + 1 });
            }
            if next.min <= prev.max {
                return Err(TierTableError::Overlap {
                    index: index + 1,
                    previous_max: prev.max,
                    min: next.min,
                });
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tier> {
        self.tiers.iter()
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = TierTableError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl<'de> Deserialize<'de> for TierTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tiers = Vec::<Tier>::deserialize(deserializer)?;
        TierTable::new(tiers).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierTableError {
    #[error("Tier table is empty")]
    Empty,

    #[error("Tier {index} has a minimum quantity of 0")]
    ZeroMinimum { index: usize },

    #[error("Tier {index} has max {max} below min {min}")]
    InvertedRange { index: usize, min: u32, max: u32 },

    #[error("Tier {index} has invalid discount {discount}")]
    InvalidDiscount { index: usize, discount: f64 },

    #[error("Tier {index} has invalid competitor price {price}")]
    InvalidCompetitorPrice { index: usize, price: f64 },

    #[error("Tier {index} is not sorted by minimum quantity")]
    Unsorted { index: usize },

    #[error("Tier {index} starts at {min}, overlapping the previous tier ending at {previous_max}")]
    Overlap {
        index: usize,
        previous_max: u32,
        min: u32,
    },
}
