//! Static bearer-token check for `/api` routes.
//!
//! When `ATRIUM_API_TOKEN` is configured, every request under `/api` must
//! carry `Authorization: Bearer <token>`. Without a configured token the
//! middleware passes everything through. Token issuance and per-role
//! permissions live in the client, not here.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use atrium_store::core::DocumentStore;

use crate::error::RestError;
use crate::state::AppState;

/// Middleware enforcing the configured bearer token.
pub async fn require_bearer<S>(
    State(state): State<AppState<S>>,
    request: Request,
    next: Next,
) -> Response
where
    S: DocumentStore + Send + Sync + 'static,
{
    let Some(token) = state.api_token() else {
        return next.run(request).await;
    };

    let expected = format!("Bearer {}", token);
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);

    if !authorized {
        debug!(path = %request.uri().path(), "rejecting request without valid bearer token");
        return RestError::Unauthorized.into_response();
    }

    next.run(request).await
}
