//! Shop entity model

use crate::core::entity::{Entity, current_timestamp};
use crate::core::error::ValidationError;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::entities::offer::Offer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered local business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact: Contact,
    #[serde(default)]
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How to reach the shop owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(length(min = 1, message = "is required"))]
    pub phone: String,
    /// Always stored lowercase
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
}

/// Where the shop is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_location"))]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Overrides the generated map URL when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
}

/// A `[longitude, latitude]` pair, serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub f64, pub f64);

impl Coordinates {
    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }
}

fn validate_location(location: &Location) -> Result<(), validator::ValidationError> {
    let Some(coordinates) = location.coordinates else {
        return Ok(());
    };
    if validators::coordinates_in_range(coordinates.longitude(), coordinates.latitude()) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("coordinates");
        err.message = Some("must be [longitude, latitude] within valid ranges".into());
        Err(err)
    }
}

/// Payload for creating a shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewShop {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub address: String,
    #[validate(nested)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub location: Option<Location>,
}

/// Partial update of a shop; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Shop detail response: the shop fields plus its offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDetail {
    #[serde(flatten)]
    pub shop: Shop,
    pub offers: Vec<Offer>,
}

impl Contact {
    fn normalize(&mut self) {
        self.phone = self.phone.trim().to_string();
        self.email = self.email.trim().to_lowercase();
    }
}

impl Shop {
    /// Build a new shop from a creation payload.
    ///
    /// Text is trimmed, the email is lowercased, then the payload is validated.
    pub fn create(mut data: NewShop) -> Result<Self, ValidationError> {
        data.name = data.name.trim().to_string();
        data.address = data.address.trim().to_string();
        data.contact.normalize();
        data.validate()?;

        let now = current_timestamp();
        Ok(Self {
            id: Uuid::new_v4(),
            name: data.name,
            address: data.address,
            contact: data.contact,
            location: data.location.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a partial update, re-validate, and refresh `updated_at`.
    pub fn apply(&mut self, patch: ShopPatch) -> Result<(), ValidationError> {
        let mut merged = NewShop {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            address: patch.address.unwrap_or_else(|| self.address.clone()),
            contact: self.contact.clone(),
            location: Some(patch.location.unwrap_or_else(|| self.location.clone())),
        };
        if let Some(contact) = patch.contact {
            if let Some(phone) = contact.phone {
                merged.contact.phone = phone;
            }
            if let Some(email) = contact.email {
                merged.contact.email = email;
            }
        }

        merged.name = merged.name.trim().to_string();
        merged.address = merged.address.trim().to_string();
        merged.contact.normalize();
        merged.validate()?;

        self.name = merged.name;
        self.address = merged.address;
        self.contact = merged.contact;
        self.location = merged.location.unwrap_or_default();
        self.touch();
        Ok(())
    }

    /// Link to a map for this shop: the stored override, or a search on the address
    pub fn map_url(&self) -> String {
        match &self.location.map_link {
            Some(link) if !link.trim().is_empty() => link.clone(),
            _ => format!(
                "https://www.google.com/maps/search/{}",
                urlencoding::encode(&self.address)
            ),
        }
    }
}

impl Entity for Shop {
    fn resource_name() -> &'static str {
        "shops"
    }

    fn resource_name_singular() -> &'static str {
        "shop"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl ValidatableEntity for Shop {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("shop");

        for field in ["name", "address", "contact.phone", "contact.email"] {
            config.add_filter(field, filters::number_to_string());
        }
        config.add_filter("name", filters::trim());
        config.add_filter("address", filters::trim());
        config.add_filter("contact.phone", filters::trim());
        config.add_filter("contact.email", filters::trim());
        config.add_filter("contact.email", filters::lowercase());

        if operation == "create" {
            for field in ["name", "address", "contact.phone", "contact.email"] {
                config.add_validator(field, validators::required());
                config.add_validator(field, validators::non_empty());
            }
        } else {
            for field in ["name", "address", "contact.phone", "contact.email"] {
                config.add_validator(field, validators::optional());
                config.add_validator(field, validators::non_empty());
            }
        }
        config.add_validator("location.coordinates", validators::coordinates());

        config
    }
}
