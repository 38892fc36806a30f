//! Axum extractors for the Atrium API.

pub mod pagination;

pub use pagination::PaginationParams;
