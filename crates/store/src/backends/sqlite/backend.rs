//! SQLite backend struct and connection pooling.

use std::fmt::Debug;
use std::path::Path;
use std::time::Duration;

use r2d2::{CustomizeConnection, Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::{BackendError, StoreResult};

use super::schema;

/// SQLite backend for document storage.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    config: SqliteBackendConfig,
    is_memory: bool,
}

impl Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("config", &self.config)
            .field("is_memory", &self.is_memory)
            .finish_non_exhaustive()
    }
}

/// Configuration for the SQLite backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteBackendConfig {
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Enable WAL mode for file-based databases.
    #[serde(default = "default_true")]
    pub enable_wal: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout_ms() -> u64 {
    30_000
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}

impl Default for SqliteBackendConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            enable_wal: true,
        }
    }
}

/// Applies per-connection pragmas to every connection the pool opens.
#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout: Duration,
    enable_wal: bool,
}

impl CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(self.busy_timeout)?;
        if self.enable_wal {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        Ok(())
    }
}

fn connection_failed(e: impl std::fmt::Display) -> crate::error::StoreError {
    BackendError::ConnectionFailed {
        backend_name: "sqlite".to_string(),
        message: e.to_string(),
    }
    .into()
}

impl SqliteBackend {
    /// Creates a new in-memory SQLite backend.
    ///
    /// The pool is pinned to a single connection so every caller sees the
    /// same in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        let config = SqliteBackendConfig::default();
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .connection_customizer(Box::new(PragmaCustomizer {
                busy_timeout: Duration::from_millis(config.busy_timeout_ms),
                enable_wal: false,
            }))
            .build(manager)
            .map_err(connection_failed)?;

        Ok(Self {
            pool,
            config,
            is_memory: true,
        })
    }

    /// Opens or creates a file-based SQLite database.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_config(path, SqliteBackendConfig::default())
    }

    /// Opens a file-based database with custom configuration.
    pub fn with_config<P: AsRef<Path>>(
        path: P,
        config: SqliteBackendConfig,
    ) -> StoreResult<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref());
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms))
            .connection_customizer(Box::new(PragmaCustomizer {
                busy_timeout: Duration::from_millis(config.busy_timeout_ms),
                enable_wal: config.enable_wal,
            }))
            .build(manager)
            .map_err(connection_failed)?;

        Ok(Self {
            pool,
            config,
            is_memory: false,
        })
    }

    /// Initializes the database schema.
    pub fn init_schema(&self) -> StoreResult<()> {
        let conn = self.get_connection()?;
        schema::initialize_schema(&conn)
    }

    /// Gets a connection from the pool.
    pub(crate) fn get_connection(
        &self,
    ) -> StoreResult<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(connection_failed)
    }

    /// Returns whether this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    pub(crate) fn internal(&self, message: String) -> crate::error::StoreError {
        BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message,
        }
        .into()
    }
}
