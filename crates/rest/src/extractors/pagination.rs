//! Pagination parameter extraction.
//!
//! Parses the `page` and `limit` query parameters. Absent or non-numeric
//! values fall back to defaults rather than rejecting the request, matching
//! the forgiving treatment of filter parameters.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use atrium_store::types::PageRequest;

use crate::config::ServerConfig;

/// Raw pagination parameters from the query string.
///
/// Converted to a clamped [`PageRequest`] with [`PaginationParams::to_request`]
/// once the handler has the configured page-size bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationParams {
    /// Requested 1-based page number, if given and numeric.
    pub page: Option<usize>,
    /// Requested page size, if given and numeric.
    pub limit: Option<usize>,
}

impl PaginationParams {
    /// Resolves the raw parameters against the configured defaults and bounds.
    pub fn to_request(self, config: &ServerConfig) -> PageRequest {
        PageRequest::with_max(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(config.default_page_size),
            config.max_page_size,
        )
    }
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params: HashMap<String, String> = Query::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();

        Ok(Self {
            page: params.get("page").and_then(|v| v.parse().ok()),
            limit: params.get("limit").and_then(|v| v.parse().ok()),
        })
    }
}
