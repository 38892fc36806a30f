//! # atrium-rest - Hospital-management REST API
//!
//! This crate provides the HTTP layer of the Atrium hospital-management
//! server: a conventional REST API over the schema-driven document store in
//! `atrium-store`. Every resource (patients, appointments, staff,
//! departments, rooms, shifts, treatments, medications, visits, surgeries,
//! surgery teams, feedback, complaints, insurance) is served by the same
//! generic pipeline: resolve the schema, build a filter, fetch a page,
//! populate references, respond.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atrium_rest::{ServerConfig, create_app};
//! use atrium_store::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = SqliteBackend::open("atrium.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig::from_env();
//!     let app = create_app_with_config(backend, config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | list | GET | `/api/{resource}?page&limit&search&...` |
//! | create | POST | `/api/{resource}` |
//! | read | GET | `/api/{resource}/{id}` |
//! | replace | PUT | `/api/{resource}/{id}` |
//! | merge | PATCH | `/api/{resource}/{id}` |
//! | delete | DELETE | `/api/{resource}/{id}` |
//! | stats | GET | `/api/stats/{resource}/by/{field}` |
//! | health | GET | `/health`, `/_liveness`, `/_readiness` |
//!
//! List responses use a uniform envelope: `{ "data": [...], "pagination":
//! { "page", "limit", "total", "totalPages" } }`. Errors are `{ "error":
//! message }` with 400 for validation failures, 404 for unknown resources or
//! ids, and 500 for backend failures.
//!
//! ## Configuration
//!
//! The server is configured via `ATRIUM_*` environment variables; see
//! [`config`]. When `ATRIUM_API_TOKEN` is set, `/api` requests must carry
//! `Authorization: Bearer <token>`.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`compat`] - snake_case alias normalization for request bodies
//! - [`validate`] - Schema-driven validation of write requests
//! - [`extractors`] - Pagination parameter extraction
//! - [`middleware`] - Bearer-token check
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod compat;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;
pub mod validate;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use atrium_store::core::DocumentStore;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function; for more control use
/// [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up the complete REST API with all handlers and middleware.
///
/// # Example
///
/// ```rust,ignore
/// use atrium_rest::{ServerConfig, create_app_with_config};
/// use atrium_store::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    info!(backend = storage.backend_name(), "creating REST API server");

    let state = AppState::new(Arc::new(storage), config.clone());
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "atrium_rest={level},atrium_store={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
