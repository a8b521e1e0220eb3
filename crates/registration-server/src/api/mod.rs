//! HTTP API for the registration service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, require_admin};
pub use types::*;

use crate::sessions::AdminSessions;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use registration_store::DocumentStore;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration document store
    pub store: DocumentStore,
    /// Admin session tokens
    pub sessions: AdminSessions,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: DocumentStore, sessions: AdminSessions) -> Self {
        Self { store, sessions }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/v1/admin/registrations", get(handlers::list_registrations))
        .route(
            "/v1/admin/registrations/:id",
            delete(handlers::delete_registration),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.sessions.clone(),
            require_admin,
        ));

    Router::new()
        // Public endpoints
        .route("/health", get(handlers::health))
        .route("/v1/registrations", post(handlers::submit_registration))
        .route("/v1/admin/login", post(handlers::admin_login))
        // Session-gated admin endpoints
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
