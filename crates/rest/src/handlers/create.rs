//! Create handler.
//!
//! `POST /api/{resource}`

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, info};

use atrium_store::core::DocumentStore;
use atrium_store::populate::populate_one;
use atrium_store::reports;

use crate::compat;
use crate::error::RestResult;
use crate::state::AppState;
use crate::validate;

/// Handler for the create operation.
///
/// The body is normalized (snake_case aliases renamed) and validated before
/// the record is stored. Returns 201 with a `Location` header and the
/// populated record.
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;
    let body = compat::normalize_body(schema, body);

    debug!(resource = %schema.collection, "processing create request");

    validate::validate_create(state.storage(), schema, &body).await?;

    let mut doc = state.storage().create(schema.collection, body).await?;
    populate_one(state.storage(), schema, &mut doc).await?;

    info!(resource = %schema.collection, id = %doc.id(), "created record");

    let location = format!("{}/api/{}/{}", state.base_url(), schema.path, doc.id());
    let mut content = doc.into_content();
    reports::annotate(schema.collection, &mut content);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(content),
    )
        .into_response())
}
