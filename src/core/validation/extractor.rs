//! Axum extractor for validated entities
//!
//! This module provides the `Validated<T>` extractor that automatically
//! validates and filters request payloads before they reach handlers.

use super::config::EntityValidationConfig;
use crate::core::error::{MarketError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for entities that support validation
pub trait ValidatableEntity {
    /// Get the validation configuration for a specific operation
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that validates and filters entity data
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_shop(
///     State(market): State<Marketplace>,
///     payload: Validated<Shop>,
/// ) -> MarketResult<(StatusCode, Json<Shop>)> {
///     let data: NewShop = payload.decode()?;
///     // ...
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Decode the filtered payload into a typed request body
    pub fn decode<D: DeserializeOwned>(self) -> Result<D, MarketError> {
        serde_json::from_value(self.0)
            .map_err(|e| ValidationError::InvalidPayload(e.to_string()).into())
    }
}

// Allow dereferencing to Value
impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Operation name used to pick validation rules for a request method
pub fn operation_for(method: &axum::http::Method) -> &'static str {
    match method.as_str() {
        "PUT" | "PATCH" => "update",
        _ => "create",
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = MarketError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for(req.method());

        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidPayload(e.body_text()))?;

        let config = T::validation_config(operation);

        config
            .validate_and_filter(payload)
            .map(Validated::new)
            .map_err(|errors| ValidationError::FieldErrors(errors).into())
    }
}
