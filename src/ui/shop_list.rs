//! Shop list view

use super::state::ViewState;
use crate::client::MarketplaceClient;
use crate::entities::Shop;
use std::fmt::Write;

pub const FETCH_SHOPS_FAILED: &str =
    "Failed to fetch shops. Please make sure the backend server is running.";

/// All shops, newest first
#[derive(Debug, Default)]
pub struct ShopListView {
    pub state: ViewState<Vec<Shop>>,
}

impl ShopListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the shop list, replacing whatever was loaded before
    pub async fn load(&mut self, client: &MarketplaceClient) {
        self.state = ViewState::Loading;
        self.state = match client.shops().list().await {
            Ok(shops) => ViewState::Ready(shops),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching shops");
                ViewState::Failed(FETCH_SHOPS_FAILED.to_string())
            }
        };
    }

    /// Put a freshly created shop at the top without refetching
    pub fn shop_created(&mut self, shop: Shop) {
        match self.state.data_mut() {
            Some(shops) => shops.insert(0, shop),
            None => self.state = ViewState::Ready(vec![shop]),
        }
    }

    pub fn render(&self) -> String {
        let shops = match &self.state {
            ViewState::Loading => return "Loading...".to_string(),
            ViewState::Failed(message) => return message.clone(),
            ViewState::Ready(shops) => shops,
        };

        if shops.is_empty() {
            return "No shops yet\nBe the first to add a local shop to the marketplace!".to_string();
        }

        let mut out = String::new();
        for shop in shops {
            let _ = writeln!(out, "{}  [{}]", shop.name, shop.id);
            let _ = writeln!(out, "  {}", shop.address);
            let _ = writeln!(out, "  {} | {}", shop.contact.phone, shop.contact.email);
            let _ = writeln!(out, "  {}", shop.map_url());
        }
        out
    }
}
