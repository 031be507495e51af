use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use pressroom_catalog::{
    CostConfig, RangeOutcome, SizeVariant, Tier, TierTable, VariantGenerator, VariantReport,
};
use pressroom_core::AuthoringTemplate;
use pressroom_shared::models::{events::now_timestamp, CatalogEvent, VariantPublishedEvent};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateVariantRequest {
    pub config: Option<CostConfig>,
    pub material_id: String,
    pub finish_id: String,
    pub width: f64,
    pub height: f64,
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRangeRequest {
    pub config: Option<CostConfig>,
    pub material_id: String,
    pub finish_id: String,
    pub min_size: u32,
    pub max_size: u32,
    pub tiers: Vec<Tier>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/products/{product_id}/variants", post(generate_variant))
        .route("/v1/admin/products/{product_id}/variants/range", post(generate_variant_range))
        .route("/v1/admin/templates/{name}", get(get_template).put(save_template))
}

// ============================================================================
// Variant Handlers
// ============================================================================

/// POST /v1/admin/products/{product_id}/variants
/// Generate a single size and publish it, replacing any previous version
pub async fn generate_variant(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<GenerateVariantRequest>,
) -> Result<(StatusCode, Json<VariantReport>), AppError> {
    let tiers = TierTable::new(req.tiers)?;
    let material = state.options.material(&req.material_id)?;
    let finish = state.options.finish(&req.finish_id)?;
    let generator = VariantGenerator::new(req.config.unwrap_or_else(|| state.default_pricing.clone()));

    let report = generator.generate_report(req.width, req.height, &tiers, material, finish);
    for warning in &report.warnings {
        tracing::warn!("Variant {} for product {}: {}", report.variant.name, product_id, warning);
    }

    publish(&state, product_id, &report.variant).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// POST /v1/admin/products/{product_id}/variants/range
/// Generate square sizes in bulk, leaving existing sizes untouched
pub async fn generate_variant_range(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<GenerateRangeRequest>,
) -> Result<Json<RangeOutcome>, AppError> {
    let tiers = TierTable::new(req.tiers)?;
    let material = state.options.material(&req.material_id)?;
    let finish = state.options.finish(&req.finish_id)?;
    let generator = VariantGenerator::new(req.config.unwrap_or_else(|| state.default_pricing.clone()));

    let existing = state.catalog.variant_names(product_id).await?;
    let outcome = generator.generate_range(req.min_size, req.max_size, existing.as_slice(), &tiers, material, finish)?;

    for variant in &outcome.created {
        publish(&state, product_id, variant).await?;
    }

    tracing::info!(
        "Range {}..={} for product {}: {} created, {} skipped",
        req.min_size,
        req.max_size,
        product_id,
        outcome.created.len(),
        outcome.skipped.len()
    );
    Ok(Json(outcome))
}

async fn publish(state: &AppState, product_id: Uuid, variant: &SizeVariant) -> Result<(), AppError> {
    state.catalog.publish_variant(product_id, variant).await?;

    state.emit(CatalogEvent::VariantPublished(VariantPublishedEvent {
        product_id,
        variant_id: variant.id,
        name: variant.name.clone(),
        tier_count: variant.tiers.len(),
        timestamp: now_timestamp(),
    }));
    Ok(())
}

// ============================================================================
// Template Handlers
// ============================================================================

/// PUT /v1/admin/templates/{name}
pub async fn save_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(template): Json<AuthoringTemplate>,
) -> Result<Json<AuthoringTemplate>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Template name is empty".to_string()));
    }
    state.templates.set_template(&name, &template).await?;
    Ok(Json(template))
}

/// GET /v1/admin/templates/{name}
pub async fn get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AuthoringTemplate>, AppError> {
    let template = state.templates.get_template(&name).await?;
    template
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Template not found: {}", name)))
}
