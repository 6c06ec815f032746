//! Reusable field validators
//!
//! Each validator receives the field path and its (filtered) value, which is
//! `null` when the field is absent. Validators other than `required` accept
//! `null` so that optional fields only get checked when supplied.

use crate::core::window::parse_instant;
use serde_json::Value;
use uuid::Uuid;

/// Validator: field is required (not null)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            Err(format!("'{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: when present, must be a non-blank string
pub fn non_empty() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if !s.trim().is_empty() => Ok(()),
        Value::String(_) => Err(format!("'{}' must not be empty", field)),
        _ => Err(format!("'{}' must be a string", field)),
    }
}

/// Validator: when present, must be a UUID string
pub fn uuid() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if Uuid::parse_str(s).is_ok() => Ok(()),
        other => Err(format!("'{}' is not a valid identifier: {}", field, other)),
    }
}

/// Validator: when present, must be an RFC 3339 timestamp or a `YYYY-MM-DD` date
pub fn datetime() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if parse_instant(s).is_some() => Ok(()),
        other => Err(format!("'{}' is not a valid date: {}", field, other)),
    }
}

/// Validator: when present, must be a boolean
pub fn boolean() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null | Value::Bool(_) => Ok(()),
        _ => Err(format!("'{}' must be true or false", field)),
    }
}

/// Validator: when present, must be `[longitude, latitude]` within range
pub fn coordinates() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_null() {
            return Ok(());
        }
        let pair = value
            .as_array()
            .filter(|items| items.len() == 2)
            .and_then(|items| Some((items[0].as_f64()?, items[1].as_f64()?)));

        match pair {
            Some((longitude, latitude)) if coordinates_in_range(longitude, latitude) => Ok(()),
            _ => Err(format!(
                "'{}' must be [longitude, latitude] within valid ranges",
                field
            )),
        }
    }
}

/// Longitude in [-180, 180] and latitude in [-90, 90], both finite
pub fn coordinates_in_range(longitude: f64, latitude: f64) -> bool {
    longitude.is_finite()
        && latitude.is_finite()
        && (-180.0..=180.0).contains(&longitude)
        && (-90.0..=90.0).contains(&latitude)
}
