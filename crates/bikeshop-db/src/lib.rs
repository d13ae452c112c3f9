//! # bikeshop-db: Database Layer for the Bike Shop API
//!
//! SQLite storage for staff, stock and promo codes, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bike Shop Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /stock/transfer)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   bikeshop-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ StaffRepo     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ StockRepo     │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ PromoCodeRepo │    │              │  │   │
//! │  │   │ Management    │    │ CatalogRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bikeshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./bikeshop.db")).await?;
//!
//! let page = db.staff().list(&ListRequest::default()).await?;
//! db.stock().transfer(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::promo_code::PromoCodeRepository;
pub use repository::staff::StaffRepository;
pub use repository::stock::StockRepository;
