//! List handler.
//!
//! `GET /api/{resource}?page&limit&search&status&...`
//!
//! Returns one page of records in the uniform envelope:
//! `{ "data": [...], "pagination": { "page", "limit", "total", "totalPages" } }`.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use atrium_store::core::DocumentStore;
use atrium_store::populate::populate;
use atrium_store::query::Filter;
use atrium_store::reports;
use atrium_store::types::StoredDocument;

use crate::error::RestResult;
use crate::extractors::PaginationParams;
use crate::state::AppState;

/// Handler for the list operation.
///
/// Filter parameters beyond `page`/`limit` are interpreted by the schema:
/// `search` matches across the declared search fields, `date` selects one
/// day, and declared filter parameters match exactly (the value `all` means
/// no filter). Unknown parameters are ignored.
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    Path(resource): Path<String>,
    pagination: PaginationParams,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Response>
where
    S: DocumentStore + Send + Sync,
{
    let schema = super::resolve(&resource)?;
    let filter = Filter::from_params(schema, &params);
    let request = pagination.to_request(state.config());

    debug!(
        resource = %schema.collection,
        page = request.page(),
        limit = request.limit(),
        filtered = !filter.is_empty(),
        "processing list request"
    );

    let mut page = state
        .storage()
        .find(schema.collection, &filter, &request)
        .await?;
    populate(state.storage(), schema, &mut page.items).await?;

    let data: Vec<_> = page
        .items
        .into_iter()
        .map(StoredDocument::into_content)
        .map(|mut content| {
            reports::annotate(schema.collection, &mut content);
            content
        })
        .collect();

    let body = serde_json::json!({
        "data": data,
        "pagination": page.meta,
    });
    Ok((StatusCode::OK, Json(body)).into_response())
}
