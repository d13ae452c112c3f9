//! # bikeshop-core: Pure Domain Logic for the Bike Shop API
//!
//! This crate holds the domain types, validation rules and error taxonomy
//! shared by the database layer and the HTTP layer. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bike Shop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /staff ──► /stock ──► /stock/transfer ──► /promo_codes      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bikeshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   promo   │  │ validation│                  │   │
//! │  │   │  Staff    │  │ discount  │  │   rules   │                  │   │
//! │  │   │  Stock    │  │   math    │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bikeshop-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Staff, Stock, PromoCode, requests)
//! - [`promo`] - Promo code discount evaluation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bikeshop_core::{ListRequest, TransferRequest};
//!
//! // Paging defaults kick in for missing or non-positive values
//! let req = ListRequest::new(None, Some(-3), None);
//! assert_eq!(req.offset(), 0);
//! assert_eq!(req.limit(), 10);
//!
//! // Transfers are validated before any transaction opens
//! let transfer = TransferRequest {
//!     from_store_id: 1,
//!     to_store_id: 2,
//!     product_id: 7,
//!     quantity: 0,
//! };
//! assert!(transfer.validate().is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use promo::PromoQuote;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Offset used when a list request omits it or sends a non-positive value.
pub const DEFAULT_OFFSET: i64 = 0;

/// Page size used when a list request omits it or sends a non-positive value.
pub const DEFAULT_LIMIT: i64 = 10;

/// Upper bound on a single page.
///
/// ## Business Reason
/// Keeps one request from pulling the whole table.
pub const MAX_LIMIT: i64 = 1000;
