use serde::{Deserialize, Serialize};
use pressroom_catalog::{CostConfig, Tier, TierTable, TierTableError};

/// An authoring draft: everything needed to regenerate a product's variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoringTemplate {
    pub config: CostConfig,
    pub material_id: String,
    pub finish_id: String,
    /// Kept unvalidated so half-finished drafts can be saved
    pub tiers: Vec<Tier>,
}

impl AuthoringTemplate {
    pub fn tier_table(&self) -> Result<TierTable, TierTableError> {
        TierTable::new(self.tiers.clone())
    }
}
