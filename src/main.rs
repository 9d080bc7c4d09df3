//! Bookcat Server - single-user book catalog and loan manager

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookcat::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{similar::ItBookstoreClient, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookcat={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Bookcat v{}", env!("CARGO_PKG_VERSION"));

    // Open storage and load the catalog
    let repository = Repository::from_config(&config.storage)
        .await
        .context("Failed to open storage")?;

    let lookup = ItBookstoreClient::new(&config.lookup).context("Failed to create lookup client")?;
    let services = Services::new(repository, Arc::new(lookup), &config.lookup).await;

    let addr = SocketAddr::new(
        config.server.host.parse::<std::net::IpAddr>().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
