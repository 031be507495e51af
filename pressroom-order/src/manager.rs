use crate::models::{Order, OrderItem, OrderStatus};
use crate::quote::PricingTier;
use crate::validator::{PriceValidator, Rejection};
use uuid::Uuid;
use std::collections::HashMap;

/// A customer's request to buy one variant at the price their client computed
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_id: String,
    pub customer_email: Option<String>,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub variant_name: String,
    pub quantity: u32,
    pub claimed_final_price: f64,
}

/// Accepts orders after price validation and tracks their status
pub struct OrderManager {
    validator: PriceValidator,
    orders: HashMap<Uuid, Order>,
}

impl OrderManager {
    pub fn new(validator: PriceValidator) -> Self {
        Self {
            validator,
            orders: HashMap::new(),
        }
    }

    /// Validate the claimed price against trusted tiers and create the order.
    /// Nothing is stored when validation fails.
    pub fn place_order(
        &mut self,
        request: PlaceOrder,
        trusted_tiers: Option<&[PricingTier]>,
    ) -> Result<Order, OrderError> {
        let quote = self
            .validator
            .check(request.quantity, request.claimed_final_price, trusted_tiers)
            .inspect_err(|reason| {
                tracing::warn!(
                    "Rejected order for variant {} x{}: {}",
                    request.variant_id,
                    request.quantity,
                    reason
                );
            })?;

        let mut order = Order::new(request.customer_id, request.customer_email);
        order.add_item(OrderItem::from_quote(
            request.product_id,
            request.variant_id,
            request.variant_name,
            request.quantity,
            &quote,
        ));

        tracing::info!("Order {} accepted at {}", order.id, order.total);
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    pub fn get_order(&self, order_id: &Uuid) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Transition: Proposed → Confirmed
    pub fn confirm_order(&mut self, order_id: &Uuid) -> Result<&Order, OrderError> {
        let order = self.get_order_mut(order_id)?;

        if order.status != OrderStatus::Proposed {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Confirmed,
            });
        }

        order.update_status(OrderStatus::Confirmed);
        Ok(order)
    }

    /// Cancel an order that is not already cancelled
    pub fn cancel_order(&mut self, order_id: &Uuid) -> Result<&Order, OrderError> {
        let order = self.get_order_mut(order_id)?;

        if order.status == OrderStatus::Cancelled {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        order.update_status(OrderStatus::Cancelled);
        Ok(order)
    }

    fn get_order_mut(&mut self, order_id: &Uuid) -> Result<&mut Order, OrderError> {
        self.orders
            .get_mut(order_id)
            .ok_or(OrderError::NotFound(*order_id))
    }
}

impl Default for OrderManager {
    fn default() -> Self {
        Self::new(PriceValidator::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Price rejected: {0}")]
    PriceRejected(#[from] Rejection),
}
