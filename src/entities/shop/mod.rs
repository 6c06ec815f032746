//! Shop entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::ShopDescriptor;
pub use handlers::*;
pub use model::{Contact, ContactPatch, Coordinates, Location, NewShop, Shop, ShopDetail, ShopPatch};
