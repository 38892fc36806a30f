//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StoreResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn internal(message: String) -> crate::error::StoreError {
    BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
    }
    .into()
}

/// Initializes the database schema, migrating if necessary.
pub fn initialize_schema(conn: &Connection) -> StoreResult<()> {
    let current = get_schema_version(conn)?;

    if current == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    // Future migrations branch on `current` here.

    Ok(())
}

fn get_schema_version(conn: &Connection) -> StoreResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| internal(format!("failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> StoreResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| internal(format!("failed to clear schema version: {}", e)))?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| internal(format!("failed to set schema version: {}", e)))?;
    Ok(())
}

fn create_schema_v1(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        CREATE INDEX IF NOT EXISTS idx_documents_collection_created
            ON documents (collection, created_at DESC);",
    )
    .map_err(|e| internal(format!("failed to create schema: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_schema_gets_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_documents_table_exists() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES ('patients', 'p1', '{}', '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
    }
}
