//! # Error Types
//!
//! Domain-specific error types for bikeshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bikeshop-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bikeshop-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The source store does not hold enough of the product.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /stock/transfer { from: 1, to: 2, product: 7, quantity: 5 }
    ///      │
    ///      ▼
    /// Store 1 holds 3 of product 7
    ///      │
    ///      ▼
    /// InsufficientStock { store_id: 1, product_id: 7, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// 409 INSUFFICIENT_STOCK, nothing moved
    /// ```
    #[error(
        "Insufficient stock for product {product_id} at store {store_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        store_id: i64,
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any database work starts.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. not an integer, not an e-mail address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must differ are equal.
    #[error("{first} and {second} must differ")]
    MustDiffer { first: String, second: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            store_id: 1,
            product_id: 7,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7 at store 1: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("first_name").to_string(),
            "first_name is required"
        );
        assert_eq!(
            ValidationError::must_be_positive("quantity").to_string(),
            "quantity must be positive"
        );

        let err = ValidationError::MustDiffer {
            first: "from_store_id".to_string(),
            second: "to_store_id".to_string(),
        };
        assert_eq!(err.to_string(), "from_store_id and to_store_id must differ");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("email").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
