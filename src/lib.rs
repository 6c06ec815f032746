//! # Shop Marketplace
//!
//! A small marketplace backend: shops publish time-bounded promotional
//! offers, and the HTTP API lists which offers are running right now.
//!
//! ## Layout
//!
//! - [`entities`]: the `Shop` and `Offer` records, their validation and routes
//! - [`core`]: the [`Marketplace`](core::Marketplace) service layer, storage
//!   traits, errors and request extractors
//! - [`storage`]: in-memory and MongoDB implementations of the stores
//! - [`server`]: router assembly and serving with graceful shutdown
//! - `client` / `ui` (feature `client`): a typed HTTP client and the view
//!   state built on top of it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketplace::prelude::*;
//!
//! let config = ServerConfig::load()?;
//! let market = marketplace::storage::open(&config).await;
//!
//! ServerBuilder::new()
//!     .with_config(config.clone())
//!     .with_marketplace(market)
//!     .serve(config.bind_address()?)
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod ui;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::Entity,
        error::{MarketError, MarketResult, StorageError, ValidationError},
        gateway::Marketplace,
        service::{DataService, OfferService, ShopService},
        window::is_current_offer,
    };

    // === Entities ===
    pub use crate::entities::{
        Contact, Coordinates, Location, NewOffer, NewShop, Offer, OfferPatch, Shop, ShopDetail,
        ShopPatch,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryOfferService, InMemoryShopService};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::{MongoOfferService, MongoShopService};

    // === Config ===
    pub use crate::config::{ServerConfig, StorageKind};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === Client ===
    #[cfg(feature = "client")]
    pub use crate::client::{ClientError, MarketplaceClient};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
