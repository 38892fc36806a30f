//! Read handler.
//!
//! `GET /api/{resource}/{id}`

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use atrium_store::core::DocumentStore;
use atrium_store::populate::populate_one;
use atrium_store::reports;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the read operation. Returns the record with its references
/// populated, or 404.
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;

    debug!(resource = %schema.collection, id = %id, "processing read request");

    let mut doc = state
        .storage()
        .read(schema.collection, &id)
        .await?
        .ok_or_else(|| RestError::NotFound {
            resource: schema.collection.to_string(),
            id: id.clone(),
        })?;

    populate_one(state.storage(), schema, &mut doc).await?;

    let mut content = doc.into_content();
    reports::annotate(schema.collection, &mut content);
    Ok((StatusCode::OK, Json(content)).into_response())
}
