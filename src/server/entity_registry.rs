//! Entity registry for managing entity descriptors and their routes

use axum::Router;
use indexmap::IndexMap;

/// Trait that describes how to build routes for an entity
///
/// Each entity (Shop, Offer) implements this trait to provide its routes,
/// already bound to the state its handlers need.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "shop")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "shops"), also the first path segment
    fn plural(&self) -> &str;

    /// Build the routes for this entity, relative to the API base path
    fn build_routes(&self) -> Router;
}

/// Registry for all entities served by the API
///
/// Registration order is kept so route listings are stable.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name is the key; registering the same type twice
    /// replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
