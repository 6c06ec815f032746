//! HTTP server: route registration, middleware and serving
//!
//! [`ServerBuilder`] registers the shop and offer descriptors against a
//! [`Marketplace`](crate::core::gateway::Marketplace), nests everything under
//! `/api`, and serves with graceful shutdown.

pub mod builder;
pub mod entity_registry;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use router::{API_BASE_PATH, HEALTH_MESSAGE};
