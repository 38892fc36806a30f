//! SQLite backend implementation.
//!
//! Stores every document as a JSON blob in a single `documents` table and
//! evaluates filters with `json_extract`. Supports both in-memory databases
//! (used throughout the test suites) and file-based databases.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE documents (
//!     collection TEXT NOT NULL,
//!     id TEXT NOT NULL,
//!     data TEXT NOT NULL,          -- JSON content
//!     created_at TEXT NOT NULL,    -- RFC 3339
//!     updated_at TEXT NOT NULL,    -- RFC 3339
//!     PRIMARY KEY (collection, id)
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use atrium_store::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod schema;
mod sql;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
