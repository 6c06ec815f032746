//! Persistence gateway: marketplace semantics on top of the stores
//!
//! [`Marketplace`] is built once at startup and shared with the HTTP
//! handlers through axum state. It owns the rules that span collections:
//! offers may only be created for an existing shop, and deleting a shop
//! deletes its offers.

use crate::core::entity::Entity;
use crate::core::error::{MarketError, MarketResult};
use crate::core::service::{DataService, OfferService, ShopService};
use crate::entities::offer::{NewOffer, Offer, OfferPatch};
use crate::entities::shop::{NewShop, Shop, ShopPatch};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Handle to the shop and offer stores
#[derive(Clone)]
pub struct Marketplace {
    shops: Arc<dyn ShopService>,
    offers: Arc<dyn OfferService>,
}

impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace").finish_non_exhaustive()
    }
}

impl Marketplace {
    pub fn new(shops: Arc<dyn ShopService>, offers: Arc<dyn OfferService>) -> Self {
        Self { shops, offers }
    }

    /// A marketplace backed by fresh in-memory stores
    #[cfg(feature = "in-memory")]
    pub fn in_memory() -> Self {
        use crate::storage::in_memory::{InMemoryOfferService, InMemoryShopService};

        Self::new(
            Arc::new(InMemoryShopService::new()),
            Arc::new(InMemoryOfferService::new()),
        )
    }

    // =========================================================================
    // Shops
    // =========================================================================

    /// All shops, most recently created first
    pub async fn list_shops(&self) -> MarketResult<Vec<Shop>> {
        Ok(self.shops.list().await?)
    }

    pub async fn get_shop(&self, id: &Uuid) -> MarketResult<Shop> {
        self.shops
            .get(id)
            .await?
            .ok_or_else(|| MarketError::shop_not_found(*id))
    }

    pub async fn create_shop(&self, data: NewShop) -> MarketResult<Shop> {
        let shop = Shop::create(data)?;
        let shop = self.shops.create(shop).await?;
        tracing::debug!(shop_id = %shop.id, "shop created");
        Ok(shop)
    }

    /// Merge `patch` into the stored shop and persist it
    pub async fn update_shop(&self, id: &Uuid, patch: ShopPatch) -> MarketResult<Shop> {
        let mut shop = self.get_shop(id).await?;
        shop.apply(patch)?;
        let shop = self.shops.update(id, shop).await?;
        tracing::debug!(shop_id = %id, "shop updated");
        Ok(shop)
    }

    /// Delete a shop, then every offer referencing it.
    ///
    /// Returns the number of offers removed by the cascade. The two steps
    /// are separate store operations; an interruption between them leaves
    /// orphans that [`Marketplace::reconcile_orphans`] removes.
    pub async fn delete_shop(&self, id: &Uuid) -> MarketResult<u64> {
        if !self.shops.delete(id).await? {
            return Err(MarketError::shop_not_found(*id));
        }
        let removed = self.offers.delete_by_shop(id).await?;
        tracing::debug!(shop_id = %id, offers_removed = removed, "shop deleted");
        Ok(removed)
    }

    // =========================================================================
    // Offers
    // =========================================================================

    /// Offers of a shop, most recently created first. An unknown shop has none.
    pub async fn list_offers_by_shop(&self, shop_id: &Uuid) -> MarketResult<Vec<Offer>> {
        Ok(self.offers.find_by_shop(shop_id).await?)
    }

    /// Offers of a shop that are current at `now`
    pub async fn list_active_offers_by_shop(
        &self,
        shop_id: &Uuid,
        now: DateTime<Utc>,
    ) -> MarketResult<Vec<Offer>> {
        Ok(self.offers.find_active_by_shop(shop_id, now).await?)
    }

    /// Create an offer for an existing shop.
    ///
    /// The shop is resolved before the offer's own fields are checked, so an
    /// unknown shop is reported even when the dates are also wrong.
    pub async fn create_offer(&self, data: NewOffer) -> MarketResult<Offer> {
        if self.shops.get(&data.shop_id).await?.is_none() {
            return Err(MarketError::shop_not_found(data.shop_id));
        }

        let offer = Offer::create(data)?;
        let offer = self.offers.create(offer).await?;
        tracing::debug!(offer_id = %offer.id, shop_id = %offer.shop_id, "offer created");
        Ok(offer)
    }

    /// Merge `patch` into the stored offer. The owning shop is not re-checked.
    pub async fn update_offer(&self, id: &Uuid, patch: OfferPatch) -> MarketResult<Offer> {
        let mut offer = self
            .offers
            .get(id)
            .await?
            .ok_or_else(|| MarketError::offer_not_found(*id))?;
        offer.apply(patch)?;
        let offer = self.offers.update(id, offer).await?;
        tracing::debug!(offer_id = %id, "offer updated");
        Ok(offer)
    }

    pub async fn delete_offer(&self, id: &Uuid) -> MarketResult<()> {
        if !self.offers.delete(id).await? {
            return Err(MarketError::offer_not_found(*id));
        }
        tracing::debug!(offer_id = %id, "offer deleted");
        Ok(())
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Delete offers whose shop no longer exists. Returns how many were removed.
    pub async fn reconcile_orphans(&self) -> MarketResult<u64> {
        let shops: HashSet<Uuid> = self
            .shops
            .list()
            .await?
            .iter()
            .map(Entity::id)
            .collect();

        let mut removed = 0;
        for shop_id in self.offers.shop_ids().await? {
            if !shops.contains(&shop_id) {
                removed += self.offers.delete_by_shop(&shop_id).await?;
            }
        }

        if removed > 0 {
            tracing::info!(offers_removed = removed, "removed offers of deleted shops");
        }
        Ok(removed)
    }
}
