use uuid::Uuid;
use chrono::Utc;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct VariantPublishedEvent {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub name: String,
    pub tier_count: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderAcceptedEvent {
    pub order_id: Uuid,
    pub customer_id: String,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub total: f64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct PriceRejectedEvent {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub claimed_final_price: f64,
    pub reason: String,
    pub timestamp: i64,
}

/// Everything the service broadcasts to subscribers
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogEvent {
    VariantPublished(VariantPublishedEvent),
    OrderAccepted(OrderAcceptedEvent),
    PriceRejected(PriceRejectedEvent),
}

impl CatalogEvent {
    /// SSE event name
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogEvent::VariantPublished(_) => "variant_published",
            CatalogEvent::OrderAccepted(_) => "order_accepted",
            CatalogEvent::PriceRejected(_) => "price_rejected",
        }
    }
}

/// Current Unix time in seconds, as stamped on events.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
