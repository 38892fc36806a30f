//! Pagination types for list results.
//!
//! Pagination is offset-based with a 1-based page number, matching the
//! `page`/`limit` query parameters the API accepts.

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is not supplied.
pub const DEFAULT_LIMIT: usize = 10;

/// Upper bound on `limit` regardless of what the request asks for.
pub const MAX_LIMIT: usize = 100;

/// A validated pagination request.
///
/// `page` is 1-based. Out-of-range inputs are clamped rather than rejected:
/// `page < 1` becomes 1, `limit < 1` becomes 1, and `limit` above the
/// maximum becomes the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Creates a page request, clamping out-of-range values.
    pub fn new(page: usize, limit: usize) -> Self {
        Self::with_max(page, limit, MAX_LIMIT)
    }

    /// Creates a page request with a custom upper bound on `limit`.
    pub fn with_max(page: usize, limit: usize, max_limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of records to skip.
    pub fn skip(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata attached to a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// The 1-based page number that was requested.
    pub page: usize,

    /// The page size that was applied.
    pub limit: usize,

    /// Total count of matching records.
    pub total: u64,

    /// Total number of pages (`ceil(total / limit)`).
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl PageMeta {
    /// Computes pagination metadata for a request and total count.
    pub fn new(request: &PageRequest, total: u64) -> Self {
        Self {
            page: request.page(),
            limit: request.limit(),
            total,
            total_pages: total.div_ceil(request.limit() as u64),
        }
    }
}

/// A page of results with its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,

    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maps the items to a different type, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), DEFAULT_LIMIT);
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn test_skip_math() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.skip(), 50);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let request = PageRequest::new(0, 10);
        assert_eq!(request.page(), 1);
    }

    #[test]
    fn test_limit_clamped_to_minimum() {
        let request = PageRequest::new(1, 0);
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn test_limit_clamped_to_maximum() {
        let request = PageRequest::new(1, 100_000);
        assert_eq!(request.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(1, 5);
        let meta = PageMeta::new(&request, 12);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        let request = PageRequest::new(1, 4);
        let meta = PageMeta::new(&request, 12);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_total_pages_empty() {
        let request = PageRequest::new(1, 10);
        let meta = PageMeta::new(&request, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PageMeta::new(&PageRequest::new(2, 5), 12);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["page"], 2);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], PageMeta::new(&PageRequest::default(), 3));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.meta.total, 3);
    }
}
