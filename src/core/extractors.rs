//! Axum extractors for path identifiers
//!
//! Every `{id}` / `{shop_id}` path segment is a UUID. A segment that does not
//! parse is malformed input and is rejected with a 400 before any store is
//! touched.

use crate::core::error::{MarketError, ValidationError};
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

/// A single UUID path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Parse a raw path segment
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw.trim())
            .map(EntityId)
            .map_err(|_| ValidationError::MalformedId {
                value: raw.to_string(),
            })
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl std::ops::Deref for EntityId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = MarketError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::InvalidPayload(e.body_text()))?;

        Ok(EntityId::parse(&raw)?)
    }
}
