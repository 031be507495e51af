use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use pressroom_order::{check_tiers, PricingTier, Quote};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/quotes", post(create_quote))
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub quantity: u32,
    /// Missing or empty falls back to the default table
    #[serde(default)]
    pub tiers: Option<Vec<PricingTier>>,
}

/// POST /v1/quotes
/// Live configurator pricing. Informational only; orders are re-priced server-side.
pub async fn create_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    if req.quantity == 0 {
        return Err(AppError::ValidationError("Quantity must be at least 1".to_string()));
    }
    if let Some(tiers) = &req.tiers {
        check_tiers(tiers).map_err(|reason| AppError::ValidationError(format!("Invalid tiers: {}", reason)))?;
    }

    Ok(Json(state.quoter.quote(req.quantity, req.tiers.as_deref())))
}
