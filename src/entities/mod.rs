//! Marketplace entities
//!
//! Each entity module has a model, its HTTP handlers, and a descriptor that
//! registers the routes with the server.

pub mod offer;
pub mod shop;

pub use offer::{NewOffer, Offer, OfferPatch};
pub use shop::{Contact, ContactPatch, Coordinates, Location, NewShop, Shop, ShopDetail, ShopPatch};
