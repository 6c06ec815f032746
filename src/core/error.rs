//! Typed error handling for the marketplace
//!
//! Every failure that can reach an HTTP caller is a [`MarketError`]. The
//! category decides the status code:
//!
//! - [`EntityError`]: identifier does not resolve (404)
//! - [`ValidationError`]: missing or malformed input, bad date ordering (400)
//! - [`StorageError`]: store unreachable or failing (500)
//!
//! Response bodies always have the shape `{ "code": ..., "message": ... }`
//! with optional `details`. 5xx responses carry a generic message; the
//! underlying cause is logged and never sent to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! match marketplace.get_shop(&id).await {
//!     Ok(shop) => println!("{}", shop.name),
//!     Err(MarketError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("shop {} does not exist", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Message returned to callers for every 5xx response
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Result alias used by the gateway and the HTTP handlers
pub type MarketResult<T> = Result<T, MarketError>;

/// Result alias used by storage backends
pub type StoreResult<T> = Result<T, StorageError>;

/// The main error type of the marketplace
#[derive(Debug)]
pub enum MarketError {
    /// Entity lookups that did not resolve
    Entity(EntityError),

    /// Input validation failures
    Validation(ValidationError),

    /// Storage backend failures
    Storage(StorageError),
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::Entity(e) => write!(f, "{}", e),
            MarketError::Validation(e) => write!(f, "{}", e),
            MarketError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MarketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MarketError::Entity(e) => Some(e),
            MarketError::Validation(e) => Some(e),
            MarketError::Storage(e) => Some(e),
        }
    }
}

/// Error body sent to HTTP callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl MarketError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketError::Entity(e) => e.status_code(),
            MarketError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketError::Storage(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MarketError::Entity(e) => e.error_code(),
            MarketError::Validation(e) => e.error_code(),
            MarketError::Storage(e) => e.error_code(),
        }
    }

    /// Whether this error is the caller's fault (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    ///
    /// Server-side failures keep their code but get the generic message.
    pub fn to_response(&self) -> ErrorResponse {
        if self.is_client_error() {
            ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.details(),
            }
        } else {
            ErrorResponse {
                code: self.error_code().to_string(),
                message: GENERIC_ERROR_MESSAGE.to_string(),
                details: None,
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            MarketError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            MarketError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// Shorthand for a missing shop
    pub fn shop_not_found(id: Uuid) -> Self {
        MarketError::Entity(EntityError::NotFound {
            entity_type: "shop".to_string(),
            id,
        })
    }

    /// Shorthand for a missing offer
    pub fn offer_not_found(id: Uuid) -> Self {
        MarketError::Entity(EntityError::NotFound {
            entity_type: "offer".to_string(),
            id,
        })
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound { entity_type: String, id: Uuid },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", capitalize(entity_type), id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { entity_type, .. } => match entity_type.as_str() {
                "shop" => "SHOP_NOT_FOUND",
                "offer" => "OFFER_NOT_FOUND",
                _ => "ENTITY_NOT_FOUND",
            },
        }
    }
}

impl From<EntityError> for MarketError {
    fn from(err: EntityError) -> Self {
        MarketError::Entity(err)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One or more fields failed validation
    FieldErrors(Vec<String>),

    /// `end_date` is not strictly after `start_date`
    InvalidDateRange {
        start_date: chrono::DateTime<chrono::Utc>,
        end_date: chrono::DateTime<chrono::Utc>,
    },

    /// A path identifier is not a UUID
    MalformedId { value: String },

    /// The request body is not valid JSON or has the wrong shape
    InvalidPayload(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            ValidationError::InvalidDateRange { .. } => {
                write!(f, "End date must be after start date")
            }
            ValidationError::MalformedId { value } => {
                write!(f, "Malformed identifier '{}'", value)
            }
            ValidationError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            ValidationError::MalformedId { .. } => "MALFORMED_ID",
            ValidationError::InvalidPayload(_) => "INVALID_PAYLOAD",
        }
    }
}

impl From<ValidationError> for MarketError {
    fn from(err: ValidationError) -> Self {
        MarketError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validator_messages("", &errors, &mut messages);
        messages.sort();
        ValidationError::FieldErrors(messages)
    }
}

impl From<validator::ValidationErrors> for MarketError {
    fn from(errors: validator::ValidationErrors) -> Self {
        MarketError::Validation(errors.into())
    }
}

fn collect_validator_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(format!("'{}' {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validator_messages(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validator_messages(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug)]
pub enum StorageError {
    /// The store was never reached or the connection is lost
    Unavailable { message: String },

    /// A write targeted a document that does not exist
    NotFound { entity_type: String, id: Uuid },

    /// Encoding or decoding a document failed
    Serialization { message: String },

    /// The backend rejected or failed an operation
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
            StorageError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found in store", entity_type, id)
            }
            StorageError::Serialization { message } => {
                write!(f, "Document serialization failed: {}", message)
            }
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Store {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORE_UNAVAILABLE",
            StorageError::NotFound { .. } => "ENTITY_NOT_FOUND",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::OperationFailed { .. } => "STORAGE_ERROR",
        }
    }

    /// Shorthand for a failed backend operation
    pub fn operation(operation: &str, message: impl fmt::Display) -> Self {
        StorageError::OperationFailed {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<StorageError> for MarketError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity_type, id } => {
                MarketError::Entity(EntityError::NotFound { entity_type, id })
            }
            other => MarketError::Storage(other),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization {
            message: err.to_string(),
        }
    }
}
