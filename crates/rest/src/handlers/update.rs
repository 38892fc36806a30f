//! Replace handler.
//!
//! `PUT /api/{resource}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use atrium_store::core::DocumentStore;
use atrium_store::populate::populate_one;
use atrium_store::reports;

use crate::compat;
use crate::error::RestResult;
use crate::state::AppState;
use crate::validate;

/// Handler for the replace operation.
///
/// The body replaces the stored content wholesale; `createdAt` is preserved
/// and `updatedAt` refreshed. Last writer wins; there is no version check.
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;
    let body = compat::normalize_body(schema, body);

    debug!(resource = %schema.collection, id = %id, "processing replace request");

    validate::validate_replace(state.storage(), schema, &id, &body).await?;

    let mut doc = state.storage().replace(schema.collection, &id, body).await?;
    populate_one(state.storage(), schema, &mut doc).await?;

    let mut content = doc.into_content();
    reports::annotate(schema.collection, &mut content);
    Ok((StatusCode::OK, Json(content)).into_response())
}
