//! Application state for the REST API.
//!
//! This module defines the shared application state available to all request
//! handlers: the storage backend and the server configuration.

use std::sync::Arc;

use atrium_store::core::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`DocumentStore`])
///
/// # Example
///
/// ```rust,ignore
/// use atrium_rest::{AppState, ServerConfig};
/// use atrium_store::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: DocumentStore> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the default page size for list results.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the maximum page size for list results.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }

    /// Returns the configured API token, if the bearer check is enabled.
    pub fn api_token(&self) -> Option<&str> {
        self.config.api_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_store::backends::sqlite::SqliteBackend;

    #[test]
    fn test_state_is_cheaply_cloneable() {
        let backend = SqliteBackend::in_memory().unwrap();
        let state = AppState::new(Arc::new(backend), ServerConfig::for_testing());
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.storage, &clone.storage));
    }

    #[test]
    fn test_page_size_accessors() {
        let backend = SqliteBackend::in_memory().unwrap();
        let state = AppState::new(Arc::new(backend), ServerConfig::for_testing());
        assert_eq!(state.default_page_size(), 10);
        assert_eq!(state.max_page_size(), 100);
        assert!(state.api_token().is_none());
    }
}
