use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;
use pressroom_catalog::{ItemOption, SizeVariant};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/options", get(list_options))
        .route("/v1/products/{product_id}/variants", get(list_variants))
        .route("/v1/products/{product_id}/variants/{variant_id}", get(get_variant))
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub materials: Vec<ItemOption>,
    pub finishes: Vec<ItemOption>,
}

/// GET /v1/options
/// Selectable materials and finishes; clients send back the `id`
pub async fn list_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    let mut materials: Vec<ItemOption> = state.options.materials().cloned().collect();
    let mut finishes: Vec<ItemOption> = state.options.finishes().cloned().collect();
    materials.sort_by(|a, b| a.id.cmp(&b.id));
    finishes.sort_by(|a, b| a.id.cmp(&b.id));

    Json(OptionsResponse { materials, finishes })
}

/// GET /v1/products/{product_id}/variants
pub async fn list_variants(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<SizeVariant>>, AppError> {
    Ok(Json(state.catalog.list_variants(product_id).await?))
}

/// GET /v1/products/{product_id}/variants/{variant_id}
pub async fn get_variant(
    State(state): State<AppState>,
    Path((product_id, variant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SizeVariant>, AppError> {
    let variant = state.catalog.get_variant(product_id, variant_id).await?;
    variant
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Variant not found: {}", variant_id)))
}
