//! Server configuration for the Atrium REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ATRIUM_PORT` | 8080 | Server port |
//! | `ATRIUM_HOST` | 127.0.0.1 | Host to bind |
//! | `ATRIUM_LOG_LEVEL` | info | Log level |
//! | `ATRIUM_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ATRIUM_ENABLE_CORS` | true | Enable CORS |
//! | `ATRIUM_CORS_ORIGINS` | * | Allowed origins |
//! | `ATRIUM_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `ATRIUM_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ATRIUM_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `ATRIUM_DATABASE_URL` | (in-memory) | SQLite database path |
//! | `ATRIUM_API_TOKEN` | (unset) | Static bearer token for `/api` |
//! | `ATRIUM_DEFAULT_PAGE_SIZE` | 10 | Default list page size |
//! | `ATRIUM_MAX_PAGE_SIZE` | 100 | Maximum list page size |
//!
//! # Example
//!
//! ```rust
//! use atrium_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Server configuration for the Atrium REST API.
///
/// This struct can be constructed from environment variables using
/// [`ServerConfig::from_env`], from command line arguments using
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "atrium")]
#[command(about = "Atrium hospital-management API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ATRIUM_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ATRIUM_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ATRIUM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "ATRIUM_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ATRIUM_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ATRIUM_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATRIUM_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATRIUM_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in Location headers).
    #[arg(long, env = "ATRIUM_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database path. Unset means an in-memory database.
    #[arg(long, env = "ATRIUM_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Static bearer token required on `/api` requests. Unset disables the check.
    #[arg(long, env = "ATRIUM_API_TOKEN")]
    pub api_token: Option<String>,

    /// Default page size for list results.
    #[arg(long, env = "ATRIUM_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Maximum page size for list results.
    #[arg(long, env = "ATRIUM_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: None,
            api_token: None,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if let Some(token) = &self.api_token {
            if token.trim().is_empty() {
                errors.push("API token cannot be blank".to_string());
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and disables features that might interfere with
    /// tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:0".to_string(),
            database_url: None,
            api_token: None,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
