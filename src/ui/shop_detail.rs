//! Shop detail view: the shop, its offers, and which of them run now

use super::format_date;
use super::state::ViewState;
use crate::client::MarketplaceClient;
use crate::core::window::is_current_offer;
use crate::entities::{Offer, Shop};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use uuid::Uuid;

pub const FETCH_SHOP_DETAILS_FAILED: &str = "Failed to fetch shop details";

#[derive(Debug, Clone, PartialEq)]
pub struct ShopDetailData {
    pub shop: Shop,
    pub offers: Vec<Offer>,
}

impl ShopDetailData {
    /// Offers running at `now`, in list order
    pub fn active_offers(&self, now: DateTime<Utc>) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|offer| is_current_offer(offer, now))
            .collect()
    }
}

#[derive(Debug)]
pub struct ShopDetailView {
    pub shop_id: Uuid,
    pub state: ViewState<ShopDetailData>,
}

impl ShopDetailView {
    pub fn new(shop_id: Uuid) -> Self {
        Self {
            shop_id,
            state: ViewState::Loading,
        }
    }

    /// Fetch the shop and its offers concurrently; either failure fails the view
    pub async fn load(&mut self, client: &MarketplaceClient) {
        self.state = ViewState::Loading;

        let shops = client.shops();
        let offers = client.offers();
        let result = tokio::try_join!(shops.get(&self.shop_id), offers.list_by_shop(&self.shop_id));

        self.state = match result {
            Ok((detail, offers)) => ViewState::Ready(ShopDetailData {
                shop: detail.shop,
                offers,
            }),
            Err(e) => {
                tracing::error!(error = %e, shop_id = %self.shop_id, "Error fetching shop details");
                ViewState::Failed(FETCH_SHOP_DETAILS_FAILED.to_string())
            }
        };
    }

    /// Put a freshly created offer at the top without refetching
    pub fn offer_created(&mut self, offer: Offer) {
        if let Some(data) = self.state.data_mut() {
            data.offers.insert(0, offer);
        }
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let data = match &self.state {
            ViewState::Loading => return "Loading...".to_string(),
            ViewState::Failed(message) => return message.clone(),
            ViewState::Ready(data) => data,
        };
        let shop = &data.shop;

        let mut out = String::new();
        let _ = writeln!(out, "{}", shop.name);

        let active = data.active_offers(now);
        if !active.is_empty() {
            let _ = writeln!(out, "\nActive offers:");
            for offer in &active {
                let _ = writeln!(out, "  * {} (until {})", offer.title, format_date(&offer.end_date));
            }
        }

        let _ = writeln!(out, "\nAddress: {}", shop.address);
        let _ = writeln!(out, "Map:     {}", shop.map_url());
        let _ = writeln!(out, "Phone:   {}", shop.contact.phone);
        let _ = writeln!(out, "Email:   {}", shop.contact.email);

        let _ = writeln!(out, "\nOffers:");
        if data.offers.is_empty() {
            let _ = writeln!(out, "  No offers yet");
        }
        for offer in &data.offers {
            let marker = if is_current_offer(offer, now) { "Active" } else { "      " };
            let _ = writeln!(
                out,
                "  [{}] {}  [{}]\n           {}\n           {} -> {}",
                marker,
                offer.title,
                offer.id,
                offer.description,
                format_date(&offer.start_date),
                format_date(&offer.end_date)
            );
        }
        out
    }
}
