//! Shared test harness for REST API integration tests.

use axum_test::TestServer;
use serde_json::Value;

use atrium_rest::{ServerConfig, create_app_with_config};
use atrium_store::backends::sqlite::SqliteBackend;

/// Builds a test server over a fresh in-memory database.
pub fn test_server() -> TestServer {
    server_with_config(ServerConfig::for_testing())
}

/// Builds a test server with a custom configuration.
pub fn server_with_config(config: ServerConfig) -> TestServer {
    let backend = SqliteBackend::in_memory().expect("in-memory backend");
    backend.init_schema().expect("schema init");
    TestServer::new(create_app_with_config(backend, config)).expect("test server")
}

/// Creates a record and returns its assigned id.
pub async fn create_record(server: &TestServer, path: &str, body: Value) -> String {
    let response = server.post(&format!("/api/{path}")).json(&body).await;
    assert_eq!(
        response.status_code(),
        201,
        "create {path} failed: {}",
        response.text()
    );
    response.json::<Value>()["id"]
        .as_str()
        .expect("created record has an id")
        .to_string()
}
