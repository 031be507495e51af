use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use pressroom_order::{pricing_tiers, Order, OrderError, PlaceOrder, Rejection};
use pressroom_shared::models::{
    events::now_timestamp, CatalogEvent, OrderAcceptedEvent, PriceRejectedEvent,
};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", post(create_order))
        .route("/v1/orders/{order_id}", get(get_order))
        .route("/v1/orders/{order_id}/confirm", post(confirm_order))
        .route("/v1/orders/{order_id}/cancel", post(cancel_order))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub customer_email: Option<String>,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub claimed_final_price: f64,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/orders
/// Re-price against the stored variant and create the order only if the claim holds
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    // Tier data comes from the catalog, never from the request
    let variant = match state.catalog.get_variant(req.product_id, req.variant_id).await? {
        Some(variant) => variant,
        None => {
            let reason = Rejection::UnresolvedTiers(format!("no stored variant {}", req.variant_id));
            reject(&state, &req, &reason);
            return Err(AppError::PriceRejected(reason));
        }
    };
    let trusted = pricing_tiers(&variant);

    let placed = state.orders.write().await.place_order(
        PlaceOrder {
            customer_id: req.customer_id.clone(),
            customer_email: req.customer_email.clone(),
            product_id: req.product_id,
            variant_id: variant.id,
            variant_name: variant.name.clone(),
            quantity: req.quantity,
            claimed_final_price: req.claimed_final_price,
        },
        Some(trusted.as_slice()),
    );

    let order = match placed {
        Ok(order) => order,
        Err(OrderError::PriceRejected(reason)) => {
            reject(&state, &req, &reason);
            return Err(AppError::PriceRejected(reason));
        }
        Err(other) => return Err(other.into()),
    };

    state.emit(CatalogEvent::OrderAccepted(OrderAcceptedEvent {
        order_id: order.id,
        customer_id: order.customer_id.clone(),
        variant_id: variant.id,
        quantity: req.quantity,
        total: order.total,
        timestamp: now_timestamp(),
    }));

    Ok((StatusCode::CREATED, Json(order)))
}

fn reject(state: &AppState, req: &CreateOrderRequest, reason: &Rejection) {
    tracing::warn!(
        "Order rejected for product {} variant {}: {}",
        req.product_id,
        req.variant_id,
        reason
    );
    state.emit(CatalogEvent::PriceRejected(PriceRejectedEvent {
        product_id: req.product_id,
        variant_id: req.variant_id,
        quantity: req.quantity,
        claimed_final_price: req.claimed_final_price,
        reason: reason.to_string(),
        timestamp: now_timestamp(),
    }));
}

/// GET /v1/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state.orders.read().await.get_order(&order_id).cloned();
    order
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Order not found: {}", order_id)))
}

/// POST /v1/orders/{order_id}/confirm
pub async fn confirm_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let mut orders = state.orders.write().await;
    let order = orders.confirm_order(&order_id)?.clone();
    Ok(Json(order))
}

/// POST /v1/orders/{order_id}/cancel
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let mut orders = state.orders.write().await;
    let order = orders.cancel_order(&order_id)?.clone();
    Ok(Json(order))
}
