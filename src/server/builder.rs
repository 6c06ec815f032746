//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::router::build_api_router;
use crate::config::ServerConfig;
use crate::core::gateway::Marketplace;
use crate::entities::offer::OfferDescriptor;
use crate::entities::shop::ShopDescriptor;
use anyhow::{Result, anyhow};
use axum::Router;
use tokio::net::TcpListener;

/// Builder for the marketplace HTTP server
///
/// # Example
///
/// ```ignore
/// let market = storage::open(&config).await;
/// ServerBuilder::new()
///     .with_config(config.clone())
///     .with_marketplace(market)
///     .serve(config.bind_address()?)
///     .await?;
/// ```
pub struct ServerBuilder {
    market: Option<Marketplace>,
    config: ServerConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            market: None,
            config: ServerConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the marketplace the handlers operate on (required)
    pub fn with_marketplace(mut self, market: Marketplace) -> Self {
        self.market = Some(market);
        self
    }

    /// Use `config` for server-level settings (CORS)
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes, nested under `/api` with the entity routes
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the router with every shop, offer and health route
    pub fn build(self) -> Result<Router> {
        let market = self
            .market
            .ok_or_else(|| anyhow!("Marketplace is required. Call .with_marketplace()"))?;

        let mut registry = EntityRegistry::new();
        registry.register(Box::new(ShopDescriptor::new(market.clone())));
        registry.register(Box::new(OfferDescriptor::new(market)));

        tracing::debug!(entities = ?registry.entity_types(), "registered entity routes");

        Ok(build_api_router(
            &registry,
            self.custom_routes,
            self.config.cors_allow_any,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Stops accepting connections on SIGTERM or Ctrl+C and waits for
    /// in-flight requests.
    pub async fn serve(self, addr: impl tokio::net::ToSocketAddrs + std::fmt::Display) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
