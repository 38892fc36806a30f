//! Route configuration.
//!
//! Defines all routes for the Atrium REST API.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::get,
};

use atrium_store::core::DocumentStore;

use crate::handlers;
use crate::middleware::auth;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Resource-level (under `/api`, behind the bearer check when configured)
/// - `GET /api/{resource}` - List with filtering and pagination
/// - `POST /api/{resource}` - Create
/// - `GET /api/{resource}/{id}` - Read
/// - `PUT /api/{resource}/{id}` - Replace
/// - `PATCH /api/{resource}/{id}` - Merge
/// - `DELETE /api/{resource}/{id}` - Delete
/// - `GET /api/stats/{resource}/by/{field}` - Grouped counts
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let api = Router::new()
        .route(
            "/stats/{resource}/by/{field}",
            get(handlers::stats_handler::<S>),
        )
        .route(
            "/{resource}",
            get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            "/{resource}/{id}",
            get(handlers::read_handler::<S>)
                .put(handlers::update_handler::<S>)
                .patch(handlers::patch_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            auth::require_bearer::<S>,
        ));

    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .nest("/api", api)
        .with_state(state)
}
