//! Offer entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::OfferDescriptor;
pub use handlers::*;
pub use model::{NewOffer, Offer, OfferPatch};
