//! Marketplace API server
//!
//! Reads `MARKETPLACE_CONFIG` (optional YAML) and the environment, opens the
//! configured store and serves `/api` until Ctrl+C or SIGTERM.

use anyhow::Result;
use marketplace::config::ServerConfig;
use marketplace::server::ServerBuilder;
use marketplace::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        storage = ?config.resolved_storage(),
        database = %config.database,
        "starting marketplace server"
    );

    let market = storage::open(&config).await;

    if let Err(e) = market.reconcile_orphans().await {
        tracing::warn!(error = %e, "skipped orphan offer cleanup");
    }

    ServerBuilder::new()
        .with_config(config.clone())
        .with_marketplace(market)
        .serve(config.bind_address()?)
        .await
}
