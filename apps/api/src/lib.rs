//! # Bike Shop API
//!
//! REST server for staff, stock and promo codes.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Routes                                        │
//! │                                                                         │
//! │  GET    /health                                                        │
//! │                                                                         │
//! │  POST   /staff              GET /staff            GET /staff/{id}      │
//! │  PUT    /staff/{id}         DELETE /staff/{id}                         │
//! │                                                                         │
//! │  POST   /stock              GET /stock            GET /stock/{store}   │
//! │  PUT    /stock              DELETE /stock/{store}?product_id=          │
//! │  POST   /stock/transfer                                                │
//! │                                                                         │
//! │  POST   /promo_codes        GET /promo_codes      GET /promo_codes/{id}│
//! │  PUT    /promo_codes/{id}   DELETE /promo_codes/{id}                   │
//! │  GET    /promo_codes/{id}/discount?total=                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_HOST` - bind address (default: 0.0.0.0)
//! - `HTTP_PORT` - port (default: 8080)
//! - `DATABASE_PATH` - SQLite file (default: ./bikeshop.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `LOG_LEVEL` - tracing filter when `RUST_LOG` is unset (default: info)
//! - `LOG_FORMAT` - `text` or `json` (default: text)

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod response;

use axum::routing::{get, post};
use axum::Router;
use bikeshop_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
///
/// Cloned into every request; `Database` is a pool handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    use handlers::{health, promo_code, staff, stock};

    Router::new()
        .route("/health", get(health::health))
        .route("/staff", post(staff::create).get(staff::list))
        .route(
            "/staff/{id}",
            get(staff::get).put(staff::update).delete(staff::delete),
        )
        .route(
            "/stock",
            post(stock::create).get(stock::list).put(stock::update),
        )
        .route("/stock/transfer", post(stock::transfer))
        .route(
            "/stock/{store_id}",
            get(stock::get_by_store).delete(stock::delete),
        )
        .route("/promo_codes", post(promo_code::create).get(promo_code::list))
        .route(
            "/promo_codes/{id}",
            get(promo_code::get)
                .put(promo_code::update)
                .delete(promo_code::delete),
        )
        .route("/promo_codes/{id}/discount", get(promo_code::discount))
        .layer(axum::middleware::from_fn(logging::log_requests))
        .with_state(state)
}
