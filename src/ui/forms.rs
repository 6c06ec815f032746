//! Creation forms: raw text inputs turned into API payloads

use crate::client::{ClientError, MarketplaceClient};
use crate::core::window::parse_instant;
use crate::entities::{Contact, Coordinates, Location, NewOffer, NewShop, Offer, Shop};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FormError {
    /// Input rejected before anything was sent
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Client(#[from] ClientError),
}

fn required(errors: &mut Vec<String>, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", label));
    }
}

fn optional_number(errors: &mut Vec<String>, label: &str, value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            errors.push(format!("{} must be a number", label));
            None
        }
    }
}

/// "Add New Shop" form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub map_link: String,
    pub longitude: String,
    pub latitude: String,
}

impl ShopForm {
    pub fn to_new_shop(&self) -> Result<NewShop, FormError> {
        let mut errors = Vec::new();
        required(&mut errors, "Name", &self.name);
        required(&mut errors, "Address", &self.address);
        required(&mut errors, "Phone", &self.phone);
        required(&mut errors, "Email", &self.email);

        let longitude = optional_number(&mut errors, "Longitude", &self.longitude);
        let latitude = optional_number(&mut errors, "Latitude", &self.latitude);
        let coordinates = match (longitude, latitude) {
            (Some(lon), Some(lat)) => Some(Coordinates(lon, lat)),
            (None, None) => None,
            _ => {
                errors.push("Longitude and latitude must be given together".to_string());
                None
            }
        };

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        let map_link = Some(self.map_link.trim().to_string()).filter(|l| !l.is_empty());
        let location = (coordinates.is_some() || map_link.is_some()).then_some(Location {
            coordinates,
            map_link,
        });

        Ok(NewShop {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            contact: Contact {
                phone: self.phone.trim().to_string(),
                email: self.email.trim().to_string(),
            },
            location,
        })
    }

    pub async fn submit(&self, client: &MarketplaceClient) -> Result<Shop, FormError> {
        let data = self.to_new_shop()?;
        Ok(client.shops().create(&data).await?)
    }
}

/// "Add Offer" form, bound to one shop
#[derive(Debug, Clone, PartialEq)]
pub struct OfferForm {
    pub shop_id: Uuid,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` or RFC 3339
    pub start_date: String,
    pub end_date: String,
}

impl OfferForm {
    pub fn new(shop_id: Uuid) -> Self {
        Self {
            shop_id,
            title: String::new(),
            description: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }

    pub fn to_new_offer(&self) -> Result<NewOffer, FormError> {
        let mut errors = Vec::new();
        required(&mut errors, "Title", &self.title);
        required(&mut errors, "Description", &self.description);

        let mut date = |label: &str, raw: &str| {
            if raw.trim().is_empty() {
                errors.push(format!("{} is required", label));
                return None;
            }
            let parsed = parse_instant(raw);
            if parsed.is_none() {
                errors.push(format!("{} must be a date", label));
            }
            parsed
        };
        let start_date = date("Start date", &self.start_date);
        let end_date = date("End date", &self.end_date);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.push("End date must be after start date".to_string());
            }
        }

        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(NewOffer {
                shop_id: self.shop_id,
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                start_date,
                end_date,
            }),
            _ => Err(FormError::Invalid(errors)),
        }
    }

    pub async fn submit(&self, client: &MarketplaceClient) -> Result<Offer, FormError> {
        let data = self.to_new_offer()?;
        Ok(client.offers().create(&data).await?)
    }
}
