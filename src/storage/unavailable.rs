//! Store used when no database is configured
//!
//! The server still starts and answers the health check; every store-backed
//! request fails with `StorageError::Unavailable` (500 to the caller).

use crate::core::entity::Entity;
use crate::core::error::{StorageError, StoreResult};
use crate::core::service::{DataService, OfferService};
use crate::entities::offer::Offer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err(StorageError::Unavailable {
            message: self.reason.clone(),
        })
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for UnavailableStore {
    async fn create(&self, _entity: T) -> StoreResult<T> {
        self.fail()
    }

    async fn get(&self, _id: &Uuid) -> StoreResult<Option<T>> {
        self.fail()
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        self.fail()
    }

    async fn update(&self, _id: &Uuid, _entity: T) -> StoreResult<T> {
        self.fail()
    }

    async fn delete(&self, _id: &Uuid) -> StoreResult<bool> {
        self.fail()
    }
}

#[async_trait]
impl OfferService for UnavailableStore {
    async fn find_by_shop(&self, _shop_id: &Uuid) -> StoreResult<Vec<Offer>> {
        self.fail()
    }

    async fn find_active_by_shop(
        &self,
        _shop_id: &Uuid,
        _now: DateTime<Utc>,
    ) -> StoreResult<Vec<Offer>> {
        self.fail()
    }

    async fn delete_by_shop(&self, _shop_id: &Uuid) -> StoreResult<u64> {
        self.fail()
    }

    async fn shop_ids(&self) -> StoreResult<Vec<Uuid>> {
        self.fail()
    }
}
