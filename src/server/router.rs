//! Router assembly: entity routes, health check, middleware

use super::entity_registry::EntityRegistry;
use crate::core::message::MessageResponse;
use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Base path every API route lives under
pub const API_BASE_PATH: &str = "/api";

pub const HEALTH_MESSAGE: &str = "Shop Marketplace API is running!";

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new(HEALTH_MESSAGE))
}

/// `GET /health`, independent of any store
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

/// Nest entity, health and custom routes under [`API_BASE_PATH`] and add
/// request tracing (and permissive CORS when `cors_allow_any`).
pub fn build_api_router(
    registry: &EntityRegistry,
    custom_routes: Vec<Router>,
    cors_allow_any: bool,
) -> Router {
    let api = custom_routes
        .into_iter()
        .fold(registry.build_routes().merge(health_routes()), Router::merge);

    let app = Router::new()
        .nest(API_BASE_PATH, api)
        .layer(TraceLayer::new_for_http());

    if cors_allow_any {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
