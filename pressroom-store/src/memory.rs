use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use pressroom_catalog::SizeVariant;
use pressroom_core::{AuthoringTemplate, CatalogStore, CoreResult, TemplateStore};

/// Process-local catalog and template store, used when no Redis is configured
#[derive(Default)]
pub struct InMemoryStore {
    variants: RwLock<HashMap<Uuid, HashMap<Uuid, SizeVariant>>>,
    templates: RwLock<HashMap<String, AuthoringTemplate>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn publish_variant(&self, product_id: Uuid, variant: &SizeVariant) -> CoreResult<()> {
        self.variants
            .write()
            .await
            .entry(product_id)
            .or_default()
            .insert(variant.id, variant.clone());
        Ok(())
    }

    async fn get_variant(&self, product_id: Uuid, variant_id: Uuid) -> CoreResult<Option<SizeVariant>> {
        Ok(self
            .variants
            .read()
            .await
            .get(&product_id)
            .and_then(|variants| variants.get(&variant_id))
            .cloned())
    }

    async fn list_variants(&self, product_id: Uuid) -> CoreResult<Vec<SizeVariant>> {
        let mut variants: Vec<SizeVariant> = self
            .variants
            .read()
            .await
            .get(&product_id)
            .map(|variants| variants.values().cloned().collect())
            .unwrap_or_default();
        variants.sort_by(|a, b| a.width.total_cmp(&b.width).then(a.height.total_cmp(&b.height)));
        Ok(variants)
    }
}

#[async_trait]
impl TemplateStore for InMemoryStore {
    async fn get_template(&self, name: &str) -> CoreResult<Option<AuthoringTemplate>> {
        Ok(self.templates.read().await.get(name).cloned())
    }

    async fn set_template(&self, name: &str, template: &AuthoringTemplate) -> CoreResult<()> {
        self.templates
            .write()
            .await
            .insert(name.to_string(), template.clone());
        Ok(())
    }
}
