use std::net::SocketAddr;
use std::sync::Arc;
use pressroom_api::{app, AppState};
use pressroom_core::{CatalogStore, TemplateStore};
use pressroom_store::{Config, InMemoryStore, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressroom_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Pressroom API on port {}", config.server.port);

    let (catalog, templates): (Arc<dyn CatalogStore>, Arc<dyn TemplateStore>) = match &config.redis {
        Some(redis) => {
            let client = RedisClient::new(&redis.url).await?;
            client.ping().await?;
            tracing::info!("Using Redis catalog store");
            let client = Arc::new(client);
            let catalog: Arc<dyn CatalogStore> = client.clone();
            let templates: Arc<dyn TemplateStore> = client;
            (catalog, templates)
        }
        None => {
            tracing::warn!("No redis configured, variants will not survive a restart");
            let store = Arc::new(InMemoryStore::new());
            let catalog: Arc<dyn CatalogStore> = store.clone();
            let templates: Arc<dyn TemplateStore> = store;
            (catalog, templates)
        }
    };

    let app_state = AppState::new(
        catalog,
        templates,
        config.option_catalog()?,
        config.pricing.clone(),
        config.packaging.clone(),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
