use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use pressroom_shared::pii::Masked;
use crate::quote::Quote;

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Proposed,
    Confirmed,
    Cancelled,
}

/// An accepted purchase. Prices on it are always the server's recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: String,
    pub customer_email: Option<Masked<String>>,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(customer_id: String, customer_email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            customer_email: customer_email.map(Masked),
            items: Vec::new(),
            total: 0.0,
            currency: "INR".to_string(),
            status: OrderStatus::Proposed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.total += item.final_price;
        self.items.push(item);
        self.updated_at = Utc::now();
    }

    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }
}

/// One configured print run within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub variant_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    pub packaging_cost: f64,
    pub final_price: f64,
}

impl OrderItem {
    pub fn from_quote(
        product_id: Uuid,
        variant_id: Uuid,
        variant_name: String,
        quantity: u32,
        quote: &Quote,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            variant_id,
            variant_name,
            quantity,
            unit_price: quote.unit_price,
            subtotal: quote.subtotal,
            packaging_cost: quote.packaging_cost,
            final_price: quote.final_price,
        }
    }
}
