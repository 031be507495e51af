use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use pressroom_catalog::{CostConfig, OptionCatalog};
use pressroom_core::{CatalogStore, TemplateStore};
use pressroom_order::{OrderManager, PackagingConfig, PriceValidator, Quoter};
use pressroom_shared::models::CatalogEvent;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub templates: Arc<dyn TemplateStore>,
    pub options: Arc<OptionCatalog>,
    /// Used when an authoring request carries no cost config of its own
    pub default_pricing: CostConfig,
    pub quoter: Quoter,
    pub orders: Arc<RwLock<OrderManager>>,
    pub events: broadcast::Sender<CatalogEvent>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        templates: Arc<dyn TemplateStore>,
        options: OptionCatalog,
        default_pricing: CostConfig,
        packaging: PackagingConfig,
    ) -> Self {
        let quoter = Quoter::new(packaging);
        let validator = PriceValidator::new(quoter.clone());
        let (events, _) = broadcast::channel(100);

        Self {
            catalog,
            templates,
            options: Arc::new(options),
            default_pricing,
            quoter,
            orders: Arc::new(RwLock::new(OrderManager::new(validator))),
            events,
        }
    }

    /// Broadcast an event to `/v1/events` subscribers; having none is not an error.
    pub fn emit(&self, event: CatalogEvent) {
        let _ = self.events.send(event);
    }
}
