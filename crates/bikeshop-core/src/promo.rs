//! # Promo Code Discounts
//!
//! Pure discount evaluation for promo codes. All amounts are integer cents.
//!
//! ```text
//! order total < promo_order_limit_cents   → 0
//! percent                                 → total × pct / 100 (rounded down)
//! fixed                                   → min(discount, total)
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{DiscountType, PromoCode};

/// The outcome of applying a promo code to an order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoQuote {
    pub promo_id: i64,
    pub order_total_cents: i64,
    pub applies: bool,
    pub discount_cents: i64,
    pub total_after_discount_cents: i64,
}

impl PromoCode {
    /// Whether the code applies to an order of `order_total_cents`.
    pub fn applies_to(&self, order_total_cents: i64) -> bool {
        order_total_cents > 0 && order_total_cents >= self.promo_order_limit_cents
    }

    /// The discount this code grants on an order, in cents.
    ///
    /// Never exceeds the order total, never negative.
    ///
    /// ## Example
    /// ```rust
    /// use bikeshop_core::{DiscountType, PromoCode};
    /// use chrono::Utc;
    ///
    /// let promo = PromoCode {
    ///     promo_id: 1,
    ///     promo_name: "SPRING10".to_string(),
    ///     promo_discount: 10,
    ///     promo_discount_type: DiscountType::Percent,
    ///     promo_order_limit_cents: 50_000,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    ///
    /// assert_eq!(promo.discount_for(49_999), 0);
    /// assert_eq!(promo.discount_for(120_000), 12_000);
    /// ```
    pub fn discount_for(&self, order_total_cents: i64) -> i64 {
        if !self.applies_to(order_total_cents) {
            return 0;
        }

        let discount = match self.promo_discount_type {
            DiscountType::Percent => {
                // i128 keeps large totals from overflowing before the division
                let pct = self.promo_discount.clamp(0, 100) as i128;
                (order_total_cents as i128 * pct / 100) as i64
            }
            DiscountType::Fixed => self.promo_discount.max(0),
        };

        discount.min(order_total_cents)
    }

    /// Prices an order of `order_total_cents` with this code.
    pub fn quote(&self, order_total_cents: i64) -> PromoQuote {
        let discount_cents = self.discount_for(order_total_cents);
        PromoQuote {
            promo_id: self.promo_id,
            order_total_cents,
            applies: self.applies_to(order_total_cents),
            discount_cents,
            total_after_discount_cents: order_total_cents - discount_cents,
        }
    }
}
