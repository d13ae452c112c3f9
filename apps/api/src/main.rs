//! # Bike Shop API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load ──► logging::init ──► Database::new (+ migrations)    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                          axum::serve(router) until SIGINT / SIGTERM     │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                       Database::close                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tracing::info;

use bikeshop_api::{logging, router, ApiConfig, AppState};
use bikeshop_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("loading configuration")?;
    logging::init(&config);

    info!("Starting Bike Shop API server...");
    info!(
        database = %config.database_path,
        max_connections = config.db_max_connections,
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("opening database")?;

    let addr = config.bind_addr().await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, router(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(?e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
