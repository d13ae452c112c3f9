//! # Promo Code Repository
//!
//! Database operations for promotional discount codes.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bikeshop_core::{CreatePromo, ListRequest, PromoCode, PromoListResponse, UpdatePromo};

const PROMO_COLUMNS: &str = r#"
    promo_id, promo_name, promo_discount, promo_discount_type,
    promo_order_limit_cents, created_at, updated_at
"#;

/// Repository for promo code database operations.
#[derive(Debug, Clone)]
pub struct PromoCodeRepository {
    pool: SqlitePool,
}

impl PromoCodeRepository {
    /// Creates a new PromoCodeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PromoCodeRepository { pool }
    }

    /// Inserts a promo code and returns the new id.
    ///
    /// ## Errors
    /// * `DbError::Rejected` - invalid name or discount
    /// * `DbError::UniqueViolation` - name already used
    pub async fn create(&self, promo: &CreatePromo) -> DbResult<i64> {
        promo.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO promo_codes (
                promo_name, promo_discount, promo_discount_type,
                promo_order_limit_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(promo.promo_name.trim())
        .bind(promo.promo_discount)
        .bind(promo.promo_discount_type)
        .bind(promo.promo_order_limit_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(promo_id = id, name = %promo.promo_name, "Promo code created");
        Ok(id)
    }

    /// Gets a promo code by id.
    pub async fn get_by_id(&self, promo_id: i64) -> DbResult<Option<PromoCode>> {
        let sql = format!("SELECT {PROMO_COLUMNS} FROM promo_codes WHERE promo_id = ?1");

        let promo = sqlx::query_as::<_, PromoCode>(&sql)
            .bind(promo_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(promo)
    }

    /// Lists one page of promo codes ordered by id, searching the name.
    pub async fn list(&self, req: &ListRequest) -> DbResult<PromoListResponse> {
        let search = req.search_pattern();
        let filter = r"(?1 = '' OR promo_name LIKE '%' || ?1 || '%' ESCAPE '\')";

        let count_sql = format!("SELECT COUNT(*) FROM promo_codes WHERE {filter}");
        let count: i64 = sqlx::query_scalar(&count_sql)
            .bind(search.as_str())
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            "SELECT {PROMO_COLUMNS} FROM promo_codes WHERE {filter} \
             ORDER BY promo_id LIMIT ?2 OFFSET ?3"
        );
        let promo_codes = sqlx::query_as::<_, PromoCode>(&page_sql)
            .bind(search.as_str())
            .bind(req.limit())
            .bind(req.offset())
            .fetch_all(&self.pool)
            .await?;

        debug!(count, returned = promo_codes.len(), "Listed promo codes");
        Ok(PromoListResponse { count, promo_codes })
    }

    /// Replaces a promo code's fields.
    pub async fn update(&self, promo: &UpdatePromo) -> DbResult<()> {
        promo.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE promo_codes SET
                promo_name = ?2,
                promo_discount = ?3,
                promo_discount_type = ?4,
                promo_order_limit_cents = ?5,
                updated_at = ?6
            WHERE promo_id = ?1
            "#,
        )
        .bind(promo.promo_id)
        .bind(promo.promo_name.trim())
        .bind(promo.promo_discount)
        .bind(promo.promo_discount_type)
        .bind(promo.promo_order_limit_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Promo code", promo.promo_id));
        }

        Ok(())
    }

    /// Deletes a promo code.
    pub async fn delete(&self, promo_id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM promo_codes WHERE promo_id = ?1")
            .bind(promo_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Promo code", promo_id));
        }

        debug!(promo_id, "Promo code deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use bikeshop_core::DiscountType;

    fn spring(discount: i64) -> CreatePromo {
        CreatePromo {
            promo_name: "SPRING".to_string(),
            promo_discount: discount,
            promo_discount_type: DiscountType::Percent,
            promo_order_limit_cents: 10_000,
        }
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.promo_codes();

        let id = repo.create(&spring(15)).await.unwrap();
        let promo = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(promo.promo_name, "SPRING");
        assert_eq!(promo.promo_discount_type, DiscountType::Percent);
        assert_eq!(promo.discount_for(20_000), 3_000);
        assert!(repo.get_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_and_bad_discount() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.promo_codes();
        repo.create(&spring(15)).await.unwrap();

        assert!(matches!(
            repo.create(&spring(20)).await,
            Err(DbError::UniqueViolation { .. })
        ));
        assert!(matches!(
            repo.create(&spring(150)).await,
            Err(DbError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_list_update_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.promo_codes();

        for name in ["SUMMER5", "SUMMER10", "WINTER_50%"] {
            repo.create(&CreatePromo {
                promo_name: name.to_string(),
                promo_discount: 500,
                promo_discount_type: DiscountType::Fixed,
                promo_order_limit_cents: 0,
            })
            .await
            .unwrap();
        }

        let page = repo
            .list(&ListRequest::new(None, None, Some("summer".to_string())))
            .await
            .unwrap();
        assert_eq!(page.count, 2);

        let page = repo
            .list(&ListRequest::new(None, Some(1), None))
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.promo_codes.len(), 1);

        let first = page.promo_codes[0].promo_id;
        repo.update(&UpdatePromo {
            promo_id: first,
            promo_name: "SUMMER5".to_string(),
            promo_discount: 7,
            promo_discount_type: DiscountType::Percent,
            promo_order_limit_cents: 5_000,
        })
        .await
        .unwrap();
        let promo = repo.get_by_id(first).await.unwrap().unwrap();
        assert_eq!(promo.promo_discount, 7);
        assert_eq!(promo.promo_discount_type, DiscountType::Percent);

        repo.delete(first).await.unwrap();
        assert!(matches!(
            repo.delete(first).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
