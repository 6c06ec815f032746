//! Entity descriptor for Shop

use super::handlers::{create_shop, delete_shop, get_shop, list_shops, update_shop};
use crate::core::gateway::Marketplace;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Shop entity
pub struct ShopDescriptor {
    pub market: Marketplace,
}

impl ShopDescriptor {
    pub fn new(market: Marketplace) -> Self {
        Self { market }
    }
}

impl EntityDescriptor for ShopDescriptor {
    fn entity_type(&self) -> &str {
        "shop"
    }

    fn plural(&self) -> &str {
        "shops"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/shops", get(list_shops).post(create_shop))
            .route(
                "/shops/{id}",
                get(get_shop).put(update_shop).delete(delete_shop),
            )
            .with_state(self.market.clone())
    }
}
