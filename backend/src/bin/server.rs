//! Clinic HTTP Server Binary
//!
//! Initializes logging, configuration and the in-memory repository, then
//! serves the REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin clinic-server
//!
//! # Custom port and verbose logs
//! PORT=9000 RUST_LOG=clinic_reservations=debug,tower_http=debug cargo run --bin clinic-server
//! ```
//!
//! See [`clinic_reservations::config`] for the configuration file format and
//! the environment variables read at startup.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clinic_reservations::config::ServerConfig;
use clinic_reservations::db;
use clinic_reservations::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load server configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting clinic reservation server");

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized (in-memory, nothing is persisted)");

    let state = AppState::new(repository);
    let app = create_router(state);

    let addr = config.bind_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
