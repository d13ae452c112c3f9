//! # Domain Types
//!
//! Core domain types used throughout the bike shop API.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Store       │   │    Product      │   │     Staff       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  store_id       │   │  product_id     │   │  staff_id       │       │
//! │  │  store_name     │   │  product_name   │   │  store_id (FK)  │       │
//! │  └────────┬────────┘   └────────┬────────┘   │  manager_id(FK) │       │
//! │           │                     │            └─────────────────┘       │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │           ┌─────────────────────┐            ┌─────────────────┐       │
//! │           │    StockRecord      │            │   PromoCode     │       │
//! │           │  ─────────────────  │            │  ─────────────  │       │
//! │           │  (store_id,         │            │  promo_id       │       │
//! │           │   product_id) PK    │            │  discount_type  │       │
//! │           │  quantity >= 0      │            │  order_limit    │       │
//! │           └─────────────────────┘            └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are database-assigned integers. Money is integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{
    validate_discount, validate_email, validate_id, validate_name, validate_non_negative,
    validate_optional_id, validate_positive, ValidationResult,
};
use crate::{DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT};

// =============================================================================
// Store
// =============================================================================

/// A physical shop location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub store_id: i64,
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Payload for creating a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStore {
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl CreateStore {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("store_name", &self.store_name, 255)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A bike or accessory in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub model_year: i64,
    /// List price in cents.
    pub list_price_cents: i64,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProduct {
    pub product_name: String,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub model_year: i64,
    pub list_price_cents: i64,
}

impl CreateProduct {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("product_name", &self.product_name, 255)?;
        validate_optional_id("brand_id", self.brand_id)?;
        validate_optional_id("category_id", self.category_id)?;
        validate_non_negative("list_price_cents", self.list_price_cents)?;
        Ok(())
    }
}

// =============================================================================
// Staff
// =============================================================================

/// A staff member with the store and manager rows resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
    pub store_id: i64,
    pub store_data: Option<Store>,
    pub manager_id: Option<i64>,
    pub manager_data: Option<StaffSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The short form of a staff member, used for the nested manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSummary {
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

fn default_active() -> bool {
    true
}

/// Payload for creating a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaff {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub store_id: i64,
    pub manager_id: Option<i64>,
}

impl CreateStaff {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("first_name", &self.first_name, 50)?;
        validate_name("last_name", &self.last_name, 50)?;
        validate_email(&self.email)?;
        validate_id("store_id", self.store_id)?;
        validate_optional_id("manager_id", self.manager_id)?;
        Ok(())
    }
}

/// Payload for replacing a staff member's fields.
///
/// `staff_id` normally comes from the URL path; the handler overwrites
/// whatever the body carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStaff {
    #[serde(default)]
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub store_id: i64,
    pub manager_id: Option<i64>,
}

impl UpdateStaff {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id("staff_id", self.staff_id)?;
        validate_name("first_name", &self.first_name, 50)?;
        validate_name("last_name", &self.last_name, 50)?;
        validate_email(&self.email)?;
        validate_id("store_id", self.store_id)?;
        validate_optional_id("manager_id", self.manager_id)?;
        if self.manager_id == Some(self.staff_id) {
            return Err(ValidationError::MustDiffer {
                first: "manager_id".to_string(),
                second: "staff_id".to_string(),
            });
        }
        Ok(())
    }
}

/// One page of staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffListResponse {
    pub count: i64,
    pub staffs: Vec<Staff>,
}

// =============================================================================
// Stock
// =============================================================================

/// The quantity of one product held at one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockRecord {
    pub store_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// Payload for creating a stock record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateStock {
    pub store_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl CreateStock {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id("store_id", self.store_id)?;
        validate_id("product_id", self.product_id)?;
        validate_non_negative("quantity", self.quantity)
    }
}

/// Payload for setting the quantity of an existing stock record.
pub type UpdateStock = CreateStock;

/// Key for deleting stock: a whole store, or one product within it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StockPrimaryKey {
    pub store_id: i64,
    pub product_id: Option<i64>,
}

impl StockPrimaryKey {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id("store_id", self.store_id)?;
        validate_optional_id("product_id", self.product_id)
    }
}

/// One product line inside a store's stock summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockProduct {
    pub product_id: i64,
    pub product_name: String,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub model_year: i64,
    pub list_price_cents: i64,
    pub quantity: i64,
}

/// All stock held by one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStock {
    pub store_id: i64,
    /// Sum of `quantity` over `products`.
    pub quantity: i64,
    pub products: Vec<StockProduct>,
}

impl StoreStock {
    /// Builds a summary and computes the total.
    pub fn new(store_id: i64, products: Vec<StockProduct>) -> Self {
        let quantity = products.iter().map(|p| p.quantity).sum();
        StoreStock {
            store_id,
            quantity,
            products,
        }
    }
}

/// One page of store stock summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListResponse {
    /// Number of stores with matching stock.
    pub count: i64,
    pub stocks: Vec<StoreStock>,
}

/// Move `quantity` units of `product_id` from one store to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_store_id: i64,
    pub to_store_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

impl TransferRequest {
    /// Rejects malformed transfers before a transaction is opened.
    ///
    /// ## Rules
    /// - every identifier is positive
    /// - `quantity > 0` (zero would be a no-op, negative would invert the move)
    /// - source and destination differ
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id("from_store_id", self.from_store_id)?;
        validate_id("to_store_id", self.to_store_id)?;
        validate_id("product_id", self.product_id)?;
        validate_positive("quantity", self.quantity)?;

        if self.from_store_id == self.to_store_id {
            return Err(ValidationError::MustDiffer {
                first: "from_store_id".to_string(),
                second: "to_store_id".to_string(),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Promo Code
// =============================================================================

/// How `promo_discount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Whole percent of the order total (1-100).
    Percent,
    /// Fixed amount in cents.
    Fixed,
}

/// A promotional discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PromoCode {
    pub promo_id: i64,
    pub promo_name: String,
    pub promo_discount: i64,
    pub promo_discount_type: DiscountType,
    /// Minimum order total (cents) for the code to apply.
    pub promo_order_limit_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a promo code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromo {
    pub promo_name: String,
    pub promo_discount: i64,
    pub promo_discount_type: DiscountType,
    #[serde(default)]
    pub promo_order_limit_cents: i64,
}

impl CreatePromo {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("promo_name", &self.promo_name, 100)?;
        validate_discount(self.promo_discount_type, self.promo_discount)?;
        validate_non_negative("promo_order_limit_cents", self.promo_order_limit_cents)
    }
}

/// Payload for replacing a promo code's fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePromo {
    #[serde(default)]
    pub promo_id: i64,
    pub promo_name: String,
    pub promo_discount: i64,
    pub promo_discount_type: DiscountType,
    #[serde(default)]
    pub promo_order_limit_cents: i64,
}

impl UpdatePromo {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_id("promo_id", self.promo_id)?;
        validate_name("promo_name", &self.promo_name, 100)?;
        validate_discount(self.promo_discount_type, self.promo_discount)?;
        validate_non_negative("promo_order_limit_cents", self.promo_order_limit_cents)
    }
}

/// One page of promo codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoListResponse {
    pub count: i64,
    pub promo_codes: Vec<PromoCode>,
}

// =============================================================================
// Listing
// =============================================================================

/// Paging and free-text filter for list operations.
///
/// Missing or non-positive `offset`/`limit` fall back to
/// [`DEFAULT_OFFSET`]/[`DEFAULT_LIMIT`]; `limit` is capped at [`MAX_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListRequest {
    pub fn new(offset: Option<i64>, limit: Option<i64>, search: Option<String>) -> Self {
        ListRequest {
            offset,
            limit,
            search,
        }
    }

    pub fn offset(&self) -> i64 {
        match self.offset {
            Some(offset) if offset > 0 => offset,
            _ => DEFAULT_OFFSET,
        }
    }

    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    /// Trimmed search term, or an empty string when there is none.
    ///
    /// An empty string disables the filter.
    pub fn search(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or("")
    }

    /// [`search`](Self::search) escaped for `LIKE … ESCAPE '\'`.
    ///
    /// Repositories bind this value. `%`, `_` and `\` in the term match themselves rather than acting
    /// as wildcards. Empty stays empty.
    pub fn search_pattern(&self) -> String {
        let term = self.search();
        let mut pattern = String::with_capacity(term.len());
        for c in term.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(from: i64, to: i64, qty: i64) -> TransferRequest {
        TransferRequest {
            from_store_id: from,
            to_store_id: to,
            product_id: 7,
            quantity: qty,
        }
    }

    #[test]
    fn test_list_request_defaults() {
        let req = ListRequest::default();
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.search(), "");

        let req = ListRequest::new(Some(-5), Some(0), Some("  trek ".to_string()));
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.search(), "trek");

        let req = ListRequest::new(Some(20), Some(5_000), None);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let req = |term: &str| ListRequest::new(None, None, Some(term.to_string()));

        assert_eq!(req(" trek ").search_pattern(), "trek");
        assert_eq!(req("50%").search_pattern(), "50\\%");
        assert_eq!(req("a_b").search_pattern(), "a\\_b");
        assert_eq!(req("c:\\x").search_pattern(), "c:\\\\x");
        assert_eq!(ListRequest::default().search_pattern(), "");
    }

    #[test]
    fn test_transfer_validation() {
        assert!(transfer(1, 2, 4).validate().is_ok());

        assert!(matches!(
            transfer(1, 2, 0).validate(),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            transfer(1, 2, -4).validate(),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            transfer(1, 1, 4).validate(),
            Err(ValidationError::MustDiffer { .. })
        ));
        assert!(transfer(0, 2, 4).validate().is_err());
    }

    #[test]
    fn test_store_stock_total() {
        let line = |product_id, quantity| StockProduct {
            product_id,
            product_name: format!("Bike {}", product_id),
            brand_id: None,
            category_id: None,
            model_year: 2024,
            list_price_cents: 49_999,
            quantity,
        };
        let summary = StoreStock::new(3, vec![line(1, 4), line(2, 0), line(3, 11)]);
        assert_eq!(summary.quantity, 15);
    }

    #[test]
    fn test_update_staff_cannot_manage_self() {
        let update = UpdateStaff {
            staff_id: 4,
            first_name: "Mireya".to_string(),
            last_name: "Copeland".to_string(),
            email: "mireya.copeland@bikes.shop".to_string(),
            phone: None,
            active: true,
            store_id: 1,
            manager_id: Some(4),
        };
        assert!(matches!(
            update.validate(),
            Err(ValidationError::MustDiffer { .. })
        ));
    }

    #[test]
    fn test_discount_type_serde() {
        let json = serde_json::to_string(&DiscountType::Percent).unwrap();
        assert_eq!(json, "\"percent\"");
        let parsed: DiscountType = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(parsed, DiscountType::Fixed);
    }
}
