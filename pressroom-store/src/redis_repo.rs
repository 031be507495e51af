use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use tracing::info;
use uuid::Uuid;
use pressroom_catalog::SizeVariant;
use pressroom_core::{AuthoringTemplate, CatalogStore, CoreError, CoreResult, TemplateStore};

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    async fn connection(&self) -> CoreResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(storage_error)
    }

    pub async fn ping(&self) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}

fn storage_error(err: redis::RedisError) -> CoreError {
    CoreError::StorageError(err.to_string())
}

/// One hash per product, keyed by variant id
fn variants_key(product_id: Uuid) -> String {
    format!("catalog:{}:variants", product_id)
}

fn template_key(name: &str) -> String {
    format!("template:{}", name)
}

#[async_trait]
impl CatalogStore for RedisClient {
    async fn publish_variant(&self, product_id: Uuid, variant: &SizeVariant) -> CoreResult<()> {
        let payload = serde_json::to_string(variant)?;
        let mut conn = self.connection().await?;

        // HSET swaps the whole record in one command
        conn.hset::<_, _, _, ()>(variants_key(product_id), variant.id.to_string(), payload)
            .await
            .map_err(storage_error)?;

        info!("Variant published: {} / {} ({})", product_id, variant.id, variant.name);
        Ok(())
    }

    async fn get_variant(&self, product_id: Uuid, variant_id: Uuid) -> CoreResult<Option<SizeVariant>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .hget(variants_key(product_id), variant_id.to_string())
            .await
            .map_err(storage_error)?;

        raw.map(|payload| serde_json::from_str(&payload))
            .transpose()
            .map_err(CoreError::from)
    }

    async fn list_variants(&self, product_id: Uuid) -> CoreResult<Vec<SizeVariant>> {
        let mut conn = self.connection().await?;
        let raw: Vec<String> = conn
            .hvals(variants_key(product_id))
            .await
            .map_err(storage_error)?;

        let mut variants = raw
            .iter()
            .map(|payload| serde_json::from_str::<SizeVariant>(payload))
            .collect::<Result<Vec<_>, _>>()?;
        variants.sort_by(|a, b| a.width.total_cmp(&b.width).then(a.height.total_cmp(&b.height)));
        Ok(variants)
    }
}

#[async_trait]
impl TemplateStore for RedisClient {
    async fn get_template(&self, name: &str) -> CoreResult<Option<AuthoringTemplate>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(template_key(name)).await.map_err(storage_error)?;

        raw.map(|payload| serde_json::from_str(&payload))
            .transpose()
            .map_err(CoreError::from)
    }

    async fn set_template(&self, name: &str, template: &AuthoringTemplate) -> CoreResult<()> {
        let payload = serde_json::to_string(template)?;
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(template_key(name), payload)
            .await
            .map_err(storage_error)?;

        info!("Template saved: {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let product_id = Uuid::nil();
        assert_eq!(
            variants_key(product_id),
            "catalog:00000000-0000-0000-0000-000000000000:variants"
        );
        assert_eq!(template_key("stickers"), "template:stickers");
    }

    #[tokio::test]
    async fn test_rejects_malformed_url() {
        assert!(RedisClient::new("not a url").await.is_err());
    }
}
