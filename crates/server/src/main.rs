//! Atrium hospital-management API server.

use clap::Parser;
use tracing::info;

use atrium_rest::{ServerConfig, create_app_with_config, init_logging};
use atrium_store::backends::sqlite::SqliteBackend;

/// Creates and initializes a SQLite backend from the server configuration.
fn create_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let backend = match config.database_url.as_deref() {
        Some(path) => {
            info!(database = %path, "initializing SQLite backend");
            SqliteBackend::open(path)?
        }
        None => {
            info!("no database configured, using in-memory SQLite");
            SqliteBackend::in_memory()?
        }
    };
    backend.init_schema()?;
    Ok(backend)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        auth = config.api_token.is_some(),
        "starting Atrium server"
    );

    let backend = create_backend(&config)?;
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}
