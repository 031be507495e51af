use async_trait::async_trait;
use uuid::Uuid;
use pressroom_catalog::SizeVariant;
use crate::template::AuthoringTemplate;
use crate::CoreResult;

/// Persisted catalog of generated variants, one price table per product size.
///
/// Each call is a single atomic operation against the backing store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Store a variant, replacing any existing record with the same id wholesale
    async fn publish_variant(&self, product_id: Uuid, variant: &SizeVariant) -> CoreResult<()>;

    async fn get_variant(&self, product_id: Uuid, variant_id: Uuid) -> CoreResult<Option<SizeVariant>>;

    async fn list_variants(&self, product_id: Uuid) -> CoreResult<Vec<SizeVariant>>;

    /// Names of the variants already stored for a product
    async fn variant_names(&self, product_id: Uuid) -> CoreResult<Vec<String>> {
        Ok(self
            .list_variants(product_id)
            .await?
            .into_iter()
            .map(|v| v.name)
            .collect())
    }
}

/// Key-value cache for authoring drafts. No transactional guarantees.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn get_template(&self, name: &str) -> CoreResult<Option<AuthoringTemplate>>;

    async fn set_template(&self, name: &str, template: &AuthoringTemplate) -> CoreResult<()>;
}
