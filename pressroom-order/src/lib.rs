pub mod quote;
pub mod validator;
pub mod models;
pub mod manager;

pub use quote::{check_tiers, default_pricing_tiers, pricing_tiers, PackagingConfig, PricingTier, Quote, Quoter};
pub use validator::{PriceValidator, Rejection, PRICE_TOLERANCE};
pub use models::{Order, OrderItem, OrderStatus};
pub use manager::{OrderError, OrderManager, PlaceOrder};
