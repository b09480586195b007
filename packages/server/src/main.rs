use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use common::storage::filesystem::FilesystemPhotoStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inventory_server::cli::Cli;
use inventory_server::config::AppConfig;
use inventory_server::state::AppState;
use inventory_server::{DEFAULT_LOG_FILTER, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("Failed to load config")?;

    let photos = FilesystemPhotoStore::new(
        config.storage.cache_dir.clone(),
        config.storage.max_photo_size,
    )
    .await
    .with_context(|| {
        format!(
            "Failed to open cache directory {}",
            config.storage.cache_dir.display()
        )
    })?;

    info!(
        cache_dir = %config.storage.cache_dir.display(),
        public_dir = %config.server.public_dir.display(),
        origin = %config.server.origin(),
        max_photo_size = config.storage.max_photo_size,
        "Inventory service starting"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(config, Arc::new(photos)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
