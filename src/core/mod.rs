//! Core traits and types: entities, storage seams, errors, validation

pub mod entity;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod message;
pub mod service;
pub mod validation;
pub mod window;

pub use entity::Entity;
pub use error::{
    EntityError, ErrorResponse, MarketError, MarketResult, StorageError, StoreResult,
    ValidationError,
};
pub use extractors::EntityId;
pub use gateway::Marketplace;
pub use message::MessageResponse;
pub use service::{DataService, OfferService, ShopService};
pub use window::is_current_offer;
