//! Reusable field filters
//!
//! These filters transform entity field values before validation

use crate::core::entity::storage_precision;
use crate::core::window::parse_instant;
use anyhow::Result;
use chrono::SecondsFormat;
use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: turn a JSON number into its decimal string, so `5550100` is
/// stored as `"5550100"`
pub fn number_to_string() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Number(n) => Ok(Value::String(n.to_string())),
        other => Ok(other),
    }
}

/// Filter: rewrite any accepted date form as a UTC RFC 3339 timestamp with
/// millisecond precision.
///
/// Unparseable strings are left as they are for the `datetime` validator
/// to report.
pub fn normalize_datetime() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        let Some(instant) = value.as_str().and_then(parse_instant) else {
            return Ok(value);
        };
        Ok(Value::String(
            storage_precision(instant).to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    }
}
