//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongo;
pub mod unavailable;

#[cfg(feature = "in-memory")]
pub use in_memory::{InMemoryDataService, InMemoryOfferService, InMemoryShopService};
#[cfg(feature = "mongodb_backend")]
pub use mongo::{MongoDataService, MongoOfferService, MongoShopService};
pub use unavailable::UnavailableStore;

use crate::config::{ServerConfig, StorageKind};
use crate::core::gateway::Marketplace;
use std::sync::Arc;

/// Open the backend selected by `config`.
///
/// Never fails: when the store cannot be used the marketplace is built on
/// [`UnavailableStore`] and every store-backed request answers 500.
pub async fn open(config: &ServerConfig) -> Marketplace {
    match config.resolved_storage() {
        StorageKind::Memory => open_in_memory(),
        StorageKind::Mongodb => open_mongodb(config).await,
        StorageKind::Auto => {
            tracing::warn!(
                "no MongoDB URI configured (set MONGODB_URI); running without a database"
            );
            unavailable("no database configured")
        }
    }
}

fn unavailable(reason: &str) -> Marketplace {
    let store = Arc::new(UnavailableStore::new(reason));
    Marketplace::new(store.clone(), store)
}

#[cfg(feature = "in-memory")]
fn open_in_memory() -> Marketplace {
    tracing::info!("using in-memory storage; data is lost on restart");
    Marketplace::in_memory()
}

#[cfg(not(feature = "in-memory"))]
fn open_in_memory() -> Marketplace {
    tracing::warn!("in-memory storage requested but the `in-memory` feature is disabled");
    unavailable("in-memory storage not compiled in")
}

#[cfg(feature = "mongodb_backend")]
async fn open_mongodb(config: &ServerConfig) -> Marketplace {
    let Some(uri) = config.mongodb_uri.as_deref() else {
        tracing::warn!("storage is mongodb but no MONGODB_URI is set; running without a database");
        return unavailable("no database configured");
    };

    let database = match mongo::connect(uri, &config.database).await {
        Ok(database) => database,
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB client could not be created; running without a database");
            return unavailable("database connection failed");
        }
    };

    // The driver keeps retrying in the background, so a server that comes up
    // later is picked up without a restart.
    match mongo::ping(&database).await {
        Ok(()) => {
            tracing::info!(database = %config.database, "MongoDB connected");
            if let Err(e) = mongo::ensure_indexes(&database).await {
                tracing::warn!(error = %e, "failed to create MongoDB indexes");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "MongoDB not reachable; requests fail until it is");
        }
    }

    Marketplace::new(
        Arc::new(MongoShopService::new(database.clone())),
        Arc::new(MongoOfferService::new(database)),
    )
}

#[cfg(not(feature = "mongodb_backend"))]
async fn open_mongodb(_config: &ServerConfig) -> Marketplace {
    tracing::warn!("mongodb storage requested but the `mongodb_backend` feature is disabled");
    unavailable("mongodb support not compiled in")
}
