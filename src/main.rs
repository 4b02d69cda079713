mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use repository::Repository;
use service::NoteService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().inspect_err(|e| {
        tracing::error!("Failed to load configuration: {e}");
    })?;
    tracing::info!("Successfully loaded notes API config");

    // Repository creation and migration
    let mut repo = Repository::new(&cfg.database_dsn)
        .await
        .inspect_err(|e| tracing::error!("Failed to establish database connection: {e}"))?;

    repo.migrate()
        .await
        .inspect_err(|e| tracing::error!("Failed to migrate database: {e}"))?;

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let router = handlers::router(service);

    let listener = tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}:{}: {e}", cfg.host, cfg.port))?;

    tracing::info!("REST server starting, listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .await
        .inspect_err(|e| tracing::error!("HTTP server error: {e}"))?;

    Ok(())
}
