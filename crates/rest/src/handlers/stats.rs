//! Aggregation handler.
//!
//! `GET /api/stats/{resource}/by/{field}?limit=N`
//!
//! Groups a collection by a reference field and returns
//! `[{ "name", "count" }]` ordered by count descending. Powers the dashboard
//! widgets (staff per department, visits per patient, surgeries per room).

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use atrium_store::aggregate::count_by_reference;
use atrium_store::core::DocumentStore;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for grouped counts over a reference field.
pub async fn stats_handler<S>(
    State(state): State<AppState<S>>,
    Path((resource, field)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;
    let limit = params.get("limit").and_then(|v| v.parse().ok());

    debug!(resource = %schema.collection, field = %field, "processing stats request");

    let groups = count_by_reference(state.storage(), schema, &field, limit).await?;
    Ok((StatusCode::OK, Json(groups)).into_response())
}
