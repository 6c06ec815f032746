//! Service traits implemented by every storage backend

use crate::core::entity::Entity;
use crate::core::error::StoreResult;
use crate::entities::offer::Offer;
use crate::entities::shop::Shop;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// CRUD over one collection of entities
///
/// Implementations are agnostic to the entity they hold. The marketplace
/// semantics (cascades, existence checks) live in the gateway.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Persist a new entity
    async fn create(&self, entity: T) -> StoreResult<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> StoreResult<Option<T>>;

    /// List all entities, most recently created first
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Replace a stored entity. Fails with `StorageError::NotFound` if absent.
    async fn update(&self, id: &Uuid, entity: T) -> StoreResult<T>;

    /// Delete an entity; returns whether it existed
    async fn delete(&self, id: &Uuid) -> StoreResult<bool>;
}

/// Shop collection
pub trait ShopService: DataService<Shop> {}

impl<S: DataService<Shop>> ShopService for S {}

/// Offer collection, with the shop-scoped queries the marketplace needs
#[async_trait]
pub trait OfferService: DataService<Offer> {
    /// Offers of a shop, most recently created first
    async fn find_by_shop(&self, shop_id: &Uuid) -> StoreResult<Vec<Offer>>;

    /// Offers of a shop that are current at `now`, most recently created first
    async fn find_active_by_shop(
        &self,
        shop_id: &Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Offer>>;

    /// Delete every offer of a shop
    ///
    /// Used when deleting a shop to maintain referential integrity
    async fn delete_by_shop(&self, shop_id: &Uuid) -> StoreResult<u64>;

    /// Distinct shop ids referenced by stored offers
    async fn shop_ids(&self) -> StoreResult<Vec<Uuid>>;
}
