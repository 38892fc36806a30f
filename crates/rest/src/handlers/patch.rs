//! Merge-patch handler.
//!
//! `PATCH /api/{resource}/{id}`

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

/// Handler for the merge operation.
///
/// Top-level fields in the patch replace their stored counterparts; a `null`
/// value removes the field. Only the fields present in the patch are
/// validated.
pub async fn patch_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;
    let patch = compat::normalize_body(schema, patch);

    debug!(resource = %schema.collection, id = %id, "processing merge request");

    validate::validate_merge(state.storage(), schema, &id, &patch).await?;

    let mut doc = state.storage().merge(schema.collection, &id, patch).await?;
    populate_one(state.storage(), schema, &mut doc).await?;

    let mut content = doc.into_content();
    reports::annotate(schema.collection, &mut content);
    Ok((StatusCode::OK, Json(content)).into_response())
}
