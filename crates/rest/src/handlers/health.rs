//! Health check endpoint handlers.
//!
//! Simple endpoints for monitoring and load balancers. `/health` and
//! `/_readiness` sit outside `/api` and are never behind the bearer check.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use atrium_store::core::DocumentStore;
use atrium_store::query::Filter;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    debug!("processing health check request");

    let body = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Handler for a liveness probe. Answers as long as the process serves.
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe. Runs one cheap query to verify the
/// database is reachable.
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    debug!("processing readiness check request");

    state.storage().count("patients", &Filter::empty()).await?;

    let body = serde_json::json!({
        "status": "ready",
        "backend": state.storage().backend_name(),
        "checks": { "storage": "ok" },
    });
    Ok((StatusCode::OK, Json(body)).into_response())
}
