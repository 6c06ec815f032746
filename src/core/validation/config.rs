//! Per-entity validation configuration

use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// Declarative rules applied to a raw JSON payload before it is decoded.
///
/// Fields are addressed by dot paths (`contact.email`). Filters run first,
/// in registration order, then every validator sees the filtered value. A
/// field absent from the payload is presented to validators as `null`.
pub struct EntityValidationConfig {
    /// Entity type this config belongs to
    pub entity_type: String,
    validators: IndexMap<String, Vec<Validator>>,
    filters: IndexMap<String, Vec<Filter>>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            validators: IndexMap::new(),
            filters: IndexMap::new(),
        }
    }

    /// Register a validator for a field
    pub fn add_validator<F>(&mut self, field: &str, validator: F)
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field.to_string())
            .or_default()
            .push(Box::new(validator));
    }

    /// Register a filter for a field
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.filters
            .entry(field.to_string())
            .or_default()
            .push(Box::new(filter));
    }

    /// Apply filters, then run validators.
    ///
    /// Returns the filtered payload, or every validation message collected.
    pub fn validate_and_filter(&self, mut payload: Value) -> Result<Value, Vec<String>> {
        if !payload.is_object() {
            return Err(vec![format!(
                "{} payload must be a JSON object",
                self.entity_type
            )]);
        }

        let mut errors = Vec::new();

        for (field, filters) in &self.filters {
            let pointer = to_pointer(field);
            let Some(slot) = payload.pointer_mut(&pointer) else {
                continue;
            };
            if slot.is_null() {
                continue;
            }
            for filter in filters {
                let current = std::mem::take(slot);
                match filter(field, current.clone()) {
                    Ok(filtered) => *slot = filtered,
                    Err(e) => {
                        *slot = current;
                        errors.push(format!("'{}' {}", field, e));
                    }
                }
            }
        }

        for (field, validators) in &self.validators {
            let value = payload.pointer(&to_pointer(field)).unwrap_or(&Value::Null);
            for validator in validators {
                if let Err(message) = validator(field, value) {
                    errors.push(message);
                }
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

impl std::fmt::Debug for EntityValidationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityValidationConfig")
            .field("entity_type", &self.entity_type)
            .field("validated_fields", &self.validators.keys().collect::<Vec<_>>())
            .field("filtered_fields", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn to_pointer(path: &str) -> String {
    path.split('.').fold(String::new(), |mut pointer, segment| {
        pointer.push('/');
        pointer.push_str(segment);
        pointer
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde_json::json;

    fn config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("shop");
        config.add_filter("name", filters::trim());
        config.add_filter("contact.email", filters::trim());
        config.add_filter("contact.email", filters::lowercase());
        config.add_validator("name", validators::required());
        config.add_validator("name", validators::non_empty());
        config.add_validator("contact.email", validators::required());
        config
    }

    #[test]
    fn test_filters_apply_to_nested_paths() {
        let payload = json!({
            "name": "  Bakery ",
            "contact": { "email": " A@B.com " }
        });

        let result = config().validate_and_filter(payload).unwrap();

        assert_eq!(result["name"], "Bakery");
        assert_eq!(result["contact"]["email"], "a@b.com");
    }

    #[test]
    fn test_filters_run_before_validators() {
        let payload = json!({ "name": "   ", "contact": { "email": "x@y.z" } });

        let errors = config().validate_and_filter(payload).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'name'"));
    }

    #[test]
    fn test_missing_nested_field_is_null_for_validators() {
        let payload = json!({ "name": "Bakery" });

        let errors = config().validate_and_filter(payload).unwrap_err();

        assert_eq!(errors, vec!["'contact.email' is required".to_string()]);
    }

    #[test]
    fn test_collects_every_error() {
        let errors = config().validate_and_filter(json!({})).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let errors = config().validate_and_filter(json!([1, 2])).unwrap_err();
        assert_eq!(errors, vec!["shop payload must be a JSON object".to_string()]);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let payload = json!({ "name": "A", "contact": { "email": "a@b" }, "extra": 1 });
        let result = config().validate_and_filter(payload).unwrap();
        assert_eq!(result["extra"], 1);
    }

    #[test]
    fn test_to_pointer() {
        assert_eq!(to_pointer("name"), "/name");
        assert_eq!(to_pointer("location.coordinates"), "/location/coordinates");
    }
}
