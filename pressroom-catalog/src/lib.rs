pub mod tier;
pub mod options;
pub mod cost;
pub mod pricing;
pub mod variant;

pub use tier::{Tier, TierTable, TierTableError};
pub use options::{ItemOption, OptionCatalog, OptionError};
pub use cost::{CostBreakdown, CostConfig};
pub use pricing::{PricingMode, TierPrice};
pub use variant::{
    GenerationError, PricingWarning, MAX_RANGE_SPAN, RangeOutcome, SizeVariant, TierBreakdown, VariantGenerator,
    VariantReport, VariantTier,
};
