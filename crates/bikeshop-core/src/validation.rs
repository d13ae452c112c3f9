//! # Validation Module
//!
//! Input validation utilities for the bike shop API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  ├── Path / query string parsing (parse_id, parse_list_params)         │
//! │  └── JSON deserialization                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request structs (CreateStaff::validate, ...)                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (quantity >= 0)                                             │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bikeshop_core::validation::{parse_id, validate_positive};
//!
//! assert_eq!(parse_id("id", "42").unwrap(), 42);
//! assert!(parse_id("id", "4a").is_err());
//! assert!(validate_positive("quantity", 0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{DiscountType, ListRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-text search term.
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, length-bounded name field.
///
/// ## Example
/// ```rust
/// use bikeshop_core::validation::validate_name;
///
/// assert!(validate_name("first_name", "Fabiola", 50).is_ok());
/// assert!(validate_name("first_name", "   ", 50).is_err());
/// ```
pub fn validate_name(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an e-mail address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot and no whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    if email.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 255,
        });
    }

    let invalid = || ValidationError::invalid_format("email", "must look like name@domain.tld");

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string (possibly empty).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an identifier (database ids start at 1).
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    validate_positive(field, id)
}

/// Validates an identifier that may be absent.
pub fn validate_optional_id(field: &str, id: Option<i64>) -> ValidationResult<()> {
    match id {
        Some(id) => validate_id(field, id),
        None => Ok(()),
    }
}

/// Value must be strictly greater than zero.
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }
    Ok(())
}

/// Value must be zero or greater.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a promo discount against its type.
///
/// ## Rules
/// - `percent`: 1 to 100
/// - `fixed`: positive amount of cents
pub fn validate_discount(kind: DiscountType, discount: i64) -> ValidationResult<()> {
    match kind {
        DiscountType::Percent if !(1..=100).contains(&discount) => {
            Err(ValidationError::OutOfRange {
                field: "promo_discount".to_string(),
                min: 1,
                max: 100,
            })
        }
        DiscountType::Percent => Ok(()),
        DiscountType::Fixed => validate_positive("promo_discount", discount),
    }
}

// =============================================================================
// Request Parsing
// =============================================================================

/// Parses an identifier taken from a URL path or query string.
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<i64> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "must be an integer"))?;
    validate_id(field, id)?;
    Ok(id)
}

/// Parses a required amount in cents taken from a query string.
///
/// Must be an integer `>= 0`.
pub fn parse_amount(field: &str, raw: Option<&str>) -> ValidationResult<i64> {
    let amount =
        parse_optional_int(field, raw)?.ok_or_else(|| ValidationError::required(field))?;
    validate_non_negative(field, amount)?;
    Ok(amount)
}

fn parse_optional_int(field: &str, raw: Option<&str>) -> ValidationResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::invalid_format(field, "must be an integer")),
    }
}

/// Builds a [`ListRequest`] from raw query-string values.
///
/// Non-numeric `offset`/`limit` are input errors; missing or non-positive
/// values are accepted and resolved to the defaults by [`ListRequest`].
///
/// ## Example
/// ```rust
/// use bikeshop_core::validation::parse_list_params;
///
/// let req = parse_list_params(Some("20"), None, Some("trek")).unwrap();
/// assert_eq!(req.offset(), 20);
/// assert_eq!(req.limit(), 10);
///
/// assert!(parse_list_params(Some("x"), None, None).is_err());
/// ```
pub fn parse_list_params(
    offset: Option<&str>,
    limit: Option<&str>,
    search: Option<&str>,
) -> ValidationResult<ListRequest> {
    let offset = parse_optional_int("offset", offset)?;
    let limit = parse_optional_int("limit", limit)?;
    let search = match search {
        Some(raw) => {
            let query = validate_search_query(raw)?;
            (!query.is_empty()).then_some(query)
        }
        None => None,
    };

    Ok(ListRequest::new(offset, limit, search))
}

// =============================================================================
// Unit Tests
// =============================================================================
