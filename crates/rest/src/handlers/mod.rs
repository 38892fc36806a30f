//! HTTP request handlers.
//!
//! One handler per operation, all generic over the storage backend and all
//! driven by the schema registry: the `{resource}` path segment is resolved
//! to a [`ResourceSchema`](atrium_store::schema::ResourceSchema) and the
//! generic CRUD/query pipeline does the rest.

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod patch;
pub mod read;
pub mod stats;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use list::list_handler;
pub use patch::patch_handler;
pub use read::read_handler;
pub use stats::stats_handler;
pub use update::update_handler;

use atrium_store::schema::{self, ResourceSchema};

use crate::error::{RestError, RestResult};

/// Resolves a URL path segment to its schema, or 404s.
pub(crate) fn resolve(resource: &str) -> RestResult<&'static ResourceSchema> {
    schema::by_path(resource).ok_or_else(|| RestError::UnknownResource {
        resource: resource.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        assert!(resolve("patients").is_ok());
        assert!(resolve("surgery-teams").is_ok());
        assert!(matches!(
            resolve("widgets"),
            Err(RestError::UnknownResource { .. })
        ));
    }
}
