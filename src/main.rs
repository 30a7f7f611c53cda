//! Receiver API server binary

use std::sync::Arc;

use pix_receivers::config::AppConfig;
use pix_receivers::server::GraphQLExposure;
use pix_receivers::service::ReceiverService;
use pix_receivers::storage::ReceiverRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let repository = build_repository(&config).await?;
    let service = Arc::new(ReceiverService::with_validation(
        repository,
        config.validation_options(),
    ));

    let app = GraphQLExposure::build_router(service);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Server listening on {}", config.listen_addr);
    tracing::info!("GraphQL playground available at http://{}/", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "mongodb_backend")]
async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ReceiverRepository>> {
    use pix_receivers::storage::MongoReceiverRepository;

    let client = mongodb::Client::with_uri_str(&config.database.uri).await?;
    let database = client.database(&config.database.database);
    tracing::info!(
        uri = %config.database.uri,
        database = %config.database.database,
        "Using MongoDB storage"
    );

    Ok(Arc::new(MongoReceiverRepository::with_collection(
        &database,
        &config.database.collection,
    )))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_repository(_config: &AppConfig) -> anyhow::Result<Arc<dyn ReceiverRepository>> {
    use pix_receivers::storage::InMemoryReceiverRepository;

    tracing::info!("Using in-memory storage");
    Ok(Arc::new(InMemoryReceiverRepository::new()))
}
