//! Offer entity model

use crate::core::entity::{Entity, current_timestamp, storage_precision};
use crate::core::error::ValidationError;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::core::window::is_current_offer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A time-bounded promotion belonging to exactly one shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    /// Owning shop, by reference
    pub shop_id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Manual switch, independent of the date window
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub shop_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Partial update of an offer; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPatch {
    /// Reassign to another shop; the shop is not looked up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NewOffer {
    /// Check `end_date > start_date`.
    pub fn check_window(&self) -> Result<(), ValidationError> {
        check_window(self.start_date, self.end_date)
    }
}

fn check_window(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<(), ValidationError> {
    if end_date > start_date {
        Ok(())
    } else {
        Err(ValidationError::InvalidDateRange {
            start_date,
            end_date,
        })
    }
}

impl Offer {
    /// Build a new offer from a creation payload. New offers start active.
    ///
    /// Does not check that the shop exists; the gateway does that first.
    pub fn create(mut data: NewOffer) -> Result<Self, ValidationError> {
        data.title = data.title.trim().to_string();
        data.validate()?;
        data.start_date = storage_precision(data.start_date);
        data.end_date = storage_precision(data.end_date);
        data.check_window()?;

        let now = current_timestamp();
        Ok(Self {
            id: Uuid::new_v4(),
            shop_id: data.shop_id,
            title: data.title,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a partial update, re-validate (including the date window), and
    /// refresh `updated_at`. On error the offer is left unchanged.
    pub fn apply(&mut self, patch: OfferPatch) -> Result<(), ValidationError> {
        let merged = NewOffer {
            shop_id: patch.shop_id.unwrap_or(self.shop_id),
            title: patch
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| self.title.clone()),
            description: patch.description.unwrap_or_else(|| self.description.clone()),
            start_date: patch
                .start_date
                .map(storage_precision)
                .unwrap_or(self.start_date),
            end_date: patch.end_date.map(storage_precision).unwrap_or(self.end_date),
        };
        merged.validate()?;
        merged.check_window()?;

        self.shop_id = merged.shop_id;
        self.title = merged.title;
        self.description = merged.description;
        self.start_date = merged.start_date;
        self.end_date = merged.end_date;
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.touch();
        Ok(())
    }

    /// Whether the offer is current at `now`
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        is_current_offer(self, now)
    }
}

impl Entity for Offer {
    fn resource_name() -> &'static str {
        "offers"
    }

    fn resource_name_singular() -> &'static str {
        "offer"
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

impl ValidatableEntity for Offer {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("offer");

        config.add_filter("title", filters::number_to_string());
        config.add_filter("description", filters::number_to_string());
        config.add_filter("title", filters::trim());
        config.add_filter("startDate", filters::normalize_datetime());
        config.add_filter("endDate", filters::normalize_datetime());

        if operation == "create" {
            config.add_validator("shopId", validators::required());
            config.add_validator("shopId", validators::uuid());
            for field in ["title", "description", "startDate", "endDate"] {
                config.add_validator(field, validators::required());
            }
        } else {
            config.add_validator("shopId", validators::uuid());
            config.add_validator("isActive", validators::boolean());
        }
        config.add_validator("title", validators::non_empty());
        config.add_validator("description", validators::non_empty());
        config.add_validator("startDate", validators::datetime());
        config.add_validator("endDate", validators::datetime());

        config
    }
}
