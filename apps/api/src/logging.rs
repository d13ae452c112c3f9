//! Logging setup and per-request logging.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ApiConfig, LogFormat};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL` when both are set.
pub fn init(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Logs method, path, status and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), latency_ms, "request");
    }

    response
}
