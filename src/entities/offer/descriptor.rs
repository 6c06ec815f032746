//! Entity descriptor for Offer

use super::handlers::{
    create_offer, delete_offer, list_active_offers, list_offers_by_shop, update_offer,
};
use crate::core::gateway::Marketplace;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the Offer entity
pub struct OfferDescriptor {
    pub market: Marketplace,
}

impl OfferDescriptor {
    pub fn new(market: Marketplace) -> Self {
        Self { market }
    }
}

impl EntityDescriptor for OfferDescriptor {
    fn entity_type(&self) -> &str {
        "offer"
    }

    fn plural(&self) -> &str {
        "offers"
    }

    /// `GET /offers/{id}` reads by *shop* id while `PUT`/`DELETE` on the same
    /// path take an *offer* id.
    fn build_routes(&self) -> Router {
        Router::new()
            .route("/offers", post(create_offer))
            .route("/offers/active/{id}", get(list_active_offers))
            .route(
                "/offers/{id}",
                get(list_offers_by_shop)
                    .put(update_offer)
                    .delete(delete_offer),
            )
            .with_state(self.market.clone())
    }
}
