//! Shared types for the document store.

mod document;
mod page;

pub use document::StoredDocument;
pub use page::{DEFAULT_LIMIT, MAX_LIMIT, Page, PageMeta, PageRequest};
