//! Atrium document store.
//!
//! This crate provides the storage layer for the Atrium hospital-management
//! API: a JSON document store with schema-driven filtering, pagination,
//! relation population, and grouped-count aggregation.
//!
//! # Architecture
//!
//! - [`schema`] - Static registry describing each resource collection:
//!   search fields, filter parameters, references, status values, required
//!   fields, uniqueness, and delete dependents
//! - [`types`] - Stored documents and pagination types
//! - [`error`] - Error types for all operations
//! - [`query`] - The filter builder turning request parameters into predicates
//! - [`core`] - The [`DocumentStore`](core::DocumentStore) trait
//! - [`backends`] - Backend implementations (SQLite)
//! - [`populate`] - Batch resolution of reference fields into embedded
//!   display objects
//! - [`aggregate`] - Grouped counts by reference field
//! - [`reports`] - Shift-hours and room-occupancy arithmetic
//!
//! # Quick Start
//!
//! ```no_run
//! use atrium_store::backends::sqlite::SqliteBackend;
//! use atrium_store::core::DocumentStore;
//! use atrium_store::query::Filter;
//! use atrium_store::types::PageRequest;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteBackend::in_memory()?;
//! store.init_schema()?;
//!
//! store
//!     .create("patients", json!({"firstName": "Ada", "lastName": "Osei"}))
//!     .await?;
//!
//! let page = store
//!     .find("patients", &Filter::empty(), &PageRequest::new(1, 10))
//!     .await?;
//! assert_eq!(page.meta.total, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod backends;
pub mod core;
pub mod error;
pub mod populate;
pub mod query;
pub mod reports;
pub mod schema;
pub mod types;

pub use crate::core::DocumentStore;
pub use crate::error::{StoreError, StoreResult};
pub use crate::query::Filter;
pub use crate::types::{Page, PageMeta, PageRequest, StoredDocument};
