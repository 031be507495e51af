pub mod events;

pub use events::{CatalogEvent, OrderAcceptedEvent, PriceRejectedEvent, VariantPublishedEvent};
