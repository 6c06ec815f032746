//! Validation and filtering system
//!
//! Request payloads are filtered (trim, lowercase, date normalization) and
//! checked against per-entity rules before they are decoded and handed to
//! the gateway. The typed models re-check their own invariants, so the
//! gateway is safe to call without going through HTTP.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatableEntity, Validated};
