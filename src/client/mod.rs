//! Typed async client for the marketplace API
//!
//! One method per route. A non-success status becomes
//! [`ClientError::Status`] carrying the status text; error bodies are ignored.

pub mod error;
pub mod http;

pub use error::{ClientError, ClientResult};
pub use http::Http;

use crate::core::message::MessageResponse;
use crate::entities::{NewOffer, NewShop, Offer, OfferPatch, Shop, ShopDetail, ShopPatch};
use uuid::Uuid;

/// API base URL of a locally running server
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Client for the `/api` routes
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    http: Http,
}

impl MarketplaceClient {
    /// `base_url` includes the `/api` prefix
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            http: Http::new(base_url)?,
        })
    }

    pub fn from_http(http: Http) -> Self {
        Self { http }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn shops(&self) -> ShopApi<'_> {
        ShopApi { http: &self.http }
    }

    pub fn offers(&self) -> OfferApi<'_> {
        OfferApi { http: &self.http }
    }

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<MessageResponse> {
        self.http.get("/health").await
    }
}

/// Shop routes
#[derive(Debug, Clone, Copy)]
pub struct ShopApi<'a> {
    http: &'a Http,
}

impl ShopApi<'_> {
    pub async fn list(&self) -> ClientResult<Vec<Shop>> {
        self.http.get("/shops").await
    }

    /// Shop with its offers
    pub async fn get(&self, id: &Uuid) -> ClientResult<ShopDetail> {
        self.http.get(&format!("/shops/{}", id)).await
    }

    pub async fn create(&self, data: &NewShop) -> ClientResult<Shop> {
        self.http.post("/shops", data).await
    }

    pub async fn update(&self, id: &Uuid, patch: &ShopPatch) -> ClientResult<Shop> {
        self.http.put(&format!("/shops/{}", id), patch).await
    }

    pub async fn delete(&self, id: &Uuid) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("/shops/{}", id)).await
    }
}

/// Offer routes
#[derive(Debug, Clone, Copy)]
pub struct OfferApi<'a> {
    http: &'a Http,
}

impl OfferApi<'_> {
    pub async fn list_by_shop(&self, shop_id: &Uuid) -> ClientResult<Vec<Offer>> {
        self.http.get(&format!("/offers/{}", shop_id)).await
    }

    pub async fn active_by_shop(&self, shop_id: &Uuid) -> ClientResult<Vec<Offer>> {
        self.http.get(&format!("/offers/active/{}", shop_id)).await
    }

    pub async fn create(&self, data: &NewOffer) -> ClientResult<Offer> {
        self.http.post("/offers", data).await
    }

    pub async fn update(&self, id: &Uuid, patch: &OfferPatch) -> ClientResult<Offer> {
        self.http.put(&format!("/offers/{}", id), patch).await
    }

    pub async fn delete(&self, id: &Uuid) -> ClientResult<MessageResponse> {
        self.http.delete(&format!("/offers/{}", id)).await
    }
}
