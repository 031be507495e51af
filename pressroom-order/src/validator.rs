use crate::quote::{check_tiers, PricingTier, Quote, Quoter};

/// Maximum accepted difference between a claimed and a recomputed price, in currency units
pub const PRICE_TOLERANCE: f64 = 1.0;

/// Server-side recomputation of a client-submitted price.
///
/// Only ever fed tier data the server trusts. Any doubt is a rejection.
#[derive(Debug, Clone, Default)]
pub struct PriceValidator {
    quoter: Quoter,
}

impl PriceValidator {
    pub fn new(quoter: Quoter) -> Self {
        Self { quoter }
    }

    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    /// Recompute the price and compare it with the claim, returning the trusted quote on success.
    pub fn check(
        &self,
        quantity: u32,
        claimed_price: f64,
        trusted_tiers: Option<&[PricingTier]>,
    ) -> Result<Quote, Rejection> {
        if quantity == 0 {
            return Err(Rejection::InvalidQuantity);
        }
        if !claimed_price.is_finite() {
            return Err(Rejection::NonFiniteClaim);
        }
        if let Some(tiers) = trusted_tiers {
            check_tiers(tiers).map_err(Rejection::MalformedTiers)?;
        }

        let quote = self.quoter.quote(quantity, trusted_tiers);
        if !quote.final_price.is_finite() {
            return Err(Rejection::MalformedTiers("recomputed price is not finite".to_string()));
        }

        if (quote.final_price - claimed_price).abs() > PRICE_TOLERANCE {
            return Err(Rejection::Mismatch {
                expected: quote.final_price,
                claimed: claimed_price,
            });
        }

        Ok(quote)
    }

    pub fn validate(&self, quantity: u32, claimed_price: f64, trusted_tiers: Option<&[PricingTier]>) -> bool {
        self.check(quantity, claimed_price, trusted_tiers).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Claimed price is not a finite number")]
    NonFiniteClaim,

    #[error("Trusted tier data is malformed: {0}")]
    MalformedTiers(String),

    /// The caller could not find trusted tier data to validate against
    #[error("Trusted tier data could not be resolved: {0}")]
    UnresolvedTiers(String),

    #[error("Price mismatch: expected {expected}, claimed {claimed}")]
    Mismatch { expected: f64, claimed: f64 },
}
