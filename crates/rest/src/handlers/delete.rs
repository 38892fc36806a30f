//! Delete handler.
//!
//! `DELETE /api/{resource}/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use atrium_store::core::DocumentStore;

use crate::error::RestResult;
use crate::state::AppState;
use crate::validate;

/// Handler for the delete operation.
///
/// Deletion is blocked with 400 while dependent records still reference the
/// target (a department with staff assigned, a surgery with team members).
/// A successful delete is permanent and returns 204.
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, id)): Path<(String, String)>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;

    debug!(resource = %schema.collection, id = %id, "processing delete request");

    validate::ensure_no_dependents(state.storage(), schema, &id).await?;
    state.storage().delete(schema.collection, &id).await?;

    info!(resource = %schema.collection, id = %id, "deleted record");
    Ok(StatusCode::NO_CONTENT.into_response())
}
