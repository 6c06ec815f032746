//! In-memory implementation of the data services for testing and development

use crate::core::entity::Entity;
use crate::core::error::{StorageError, StoreResult};
use crate::core::service::{DataService, OfferService};
use crate::core::window::is_current_offer;
use crate::entities::offer::Offer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service for any entity
///
/// Uses RwLock for thread-safe access. Insertion order is kept so that
/// entities created within the same millisecond still list newest first.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    entities: Arc<RwLock<IndexMap<Uuid, T>>>,
}

/// In-memory shop store
pub type InMemoryShopService = InMemoryDataService<crate::entities::shop::Shop>;

/// In-memory offer store
pub type InMemoryOfferService = InMemoryDataService<Offer>;

impl<T: Entity> InMemoryDataService<T> {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, IndexMap<Uuid, T>>> {
        self.entities
            .read()
            .map_err(|e| StorageError::operation("read", format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, IndexMap<Uuid, T>>> {
        self.entities
            .write()
            .map_err(|e| StorageError::operation("write", format!("failed to acquire write lock: {}", e)))
    }

    /// Newest first: reverse insertion order, then a stable sort on creation time
    fn newest_first<'a>(entities: impl DoubleEndedIterator<Item = &'a T>) -> Vec<T> {
        let mut items: Vec<T> = entities.rev().cloned().collect();
        items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        items
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> StoreResult<T> {
        let mut entities = self.write()?;
        entities.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> StoreResult<Option<T>> {
        let entities = self.read()?;
        Ok(entities.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let entities = self.read()?;
        Ok(Self::newest_first(entities.values()))
    }

    async fn update(&self, id: &Uuid, entity: T) -> StoreResult<T> {
        let mut entities = self.write()?;

        let slot = entities.get_mut(id).ok_or_else(|| StorageError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: *id,
        })?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> StoreResult<bool> {
        let mut entities = self.write()?;
        Ok(entities.shift_remove(id).is_some())
    }
}

#[async_trait]
impl OfferService for InMemoryDataService<Offer> {
    async fn find_by_shop(&self, shop_id: &Uuid) -> StoreResult<Vec<Offer>> {
        let offers = self.read()?;
        Ok(Self::newest_first(
            offers.values().filter(|offer| &offer.shop_id == shop_id),
        ))
    }

    async fn find_active_by_shop(
        &self,
        shop_id: &Uuid,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<Offer>> {
        let offers = self.read()?;
        Ok(Self::newest_first(offers.values().filter(|offer| {
            &offer.shop_id == shop_id && is_current_offer(offer, now)
        })))
    }

    async fn delete_by_shop(&self, shop_id: &Uuid) -> StoreResult<u64> {
        let mut offers = self.write()?;
        let before = offers.len();
        offers.retain(|_, offer| &offer.shop_id != shop_id);
        Ok((before - offers.len()) as u64)
    }

    async fn shop_ids(&self) -> StoreResult<Vec<Uuid>> {
        let offers = self.read()?;
        let ids: IndexSet<Uuid> = offers.values().map(|offer| offer.shop_id).collect();
        Ok(ids.into_iter().collect())
    }
}
