//! HTTP transport for [`MarketplaceClient`](super::MarketplaceClient)

use super::error::{ClientError, ClientResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-over-HTTP client rooted at the API base URL
///
/// # Example
///
/// ```ignore
/// let http = Http::new("http://localhost:5000/api")?;
/// let shops: Vec<Shop> = http.get("/shops").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Http {
    client: Client,
    base_url: String,
}

impl Http {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing reqwest client (shared pool, custom timeouts)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `/shops/{id}`
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, endpoint).send().await?;
        Self::handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .request(Method::POST, endpoint)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .request(Method::PUT, endpoint)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let response = self.request(Method::DELETE, endpoint).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
