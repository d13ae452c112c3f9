//! # Stock Repository
//!
//! Per-store product quantities and transfers between stores.
//!
//! ## Transfer
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Transfer (one transaction)                     │
//! │                                                                         │
//! │  validate() ── bad input ──► Rejected(Validation), no transaction      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE stocks SET quantity = quantity - n                              │
//! │   WHERE store = from AND product = p AND quantity >= n                  │
//! │       │                                                                 │
//! │       ├── 0 rows ──► SELECT quantity                                   │
//! │       │               ├── no row ──► NotFound          ─┐              │
//! │       │               └── q < n  ──► InsufficientStock ─┴─► ROLLBACK   │
//! │       ▼                                                                 │
//! │  INSERT (to, p, n) ON CONFLICT DO UPDATE quantity = quantity + n       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded UPDATE is the first statement, so the transaction takes the
//! SQLite write lock before it reads the balance. A second transfer from the
//! same store waits on that lock (busy timeout) and then sees the committed
//! balance, so the two can never both pass the check.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bikeshop_core::{
    CoreError, CreateStock, ListRequest, StockListResponse, StockPrimaryKey, StockProduct,
    StockRecord, StoreStock, TransferRequest, UpdateStock,
};

const STOCK_SEARCH: &str = r"(?1 = '' OR p.product_name LIKE '%' || ?1 || '%' ESCAPE '\')";

/// A stock line tagged with its store, as returned by the list query.
#[derive(Debug, sqlx::FromRow)]
struct StoreStockLine {
    store_id: i64,
    #[sqlx(flatten)]
    product: StockProduct,
}

/// Repository for stock database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.stock();
///
/// repo.create(&CreateStock { store_id: 1, product_id: 7, quantity: 10 }).await?;
/// repo.transfer(&TransferRequest { from_store_id: 1, to_store_id: 2, product_id: 7, quantity: 4 }).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Inserts a stock record for a `(store, product)` pair.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the pair already has a record
    /// * `DbError::ForeignKeyViolation` - unknown store or product
    pub async fn create(&self, stock: &CreateStock) -> DbResult<StockRecord> {
        stock.validate()?;

        sqlx::query("INSERT INTO stocks (store_id, product_id, quantity) VALUES (?1, ?2, ?3)")
            .bind(stock.store_id)
            .bind(stock.product_id)
            .bind(stock.quantity)
            .execute(&self.pool)
            .await?;

        debug!(
            store_id = stock.store_id,
            product_id = stock.product_id,
            quantity = stock.quantity,
            "Stock created"
        );

        Ok(StockRecord {
            store_id: stock.store_id,
            product_id: stock.product_id,
            quantity: stock.quantity,
        })
    }

    /// Gets a single `(store, product)` record.
    pub async fn get_record(&self, store_id: i64, product_id: i64) -> DbResult<Option<StockRecord>> {
        let record = sqlx::query_as::<_, StockRecord>(
            r#"
            SELECT store_id, product_id, quantity
            FROM stocks
            WHERE store_id = ?1 AND product_id = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Gets everything a store holds, joined with product data.
    ///
    /// ## Returns
    /// * `Ok(Some(StoreStock))` - the store has at least one record
    /// * `Ok(None)` - the store has no stock records
    pub async fn get_by_store(&self, store_id: i64) -> DbResult<Option<StoreStock>> {
        let products = sqlx::query_as::<_, StockProduct>(
            r#"
            SELECT
                p.product_id, p.product_name, p.brand_id, p.category_id,
                p.model_year, p.list_price_cents, s.quantity
            FROM stocks s
            JOIN products p ON p.product_id = s.product_id
            WHERE s.store_id = ?1
            ORDER BY p.product_id
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        if products.is_empty() {
            return Ok(None);
        }

        Ok(Some(StoreStock::new(store_id, products)))
    }

    /// Lists stock grouped by store.
    ///
    /// Paging applies to stores, not product lines: a page of `limit`
    /// stores each carries all of its matching products. `count` is the
    /// number of stores with at least one matching product.
    pub async fn list(&self, req: &ListRequest) -> DbResult<StockListResponse> {
        let search = req.search_pattern();

        let count_sql = format!(
            r#"
            SELECT COUNT(DISTINCT s.store_id)
            FROM stocks s
            JOIN products p ON p.product_id = s.product_id
            WHERE {STOCK_SEARCH}
            "#
        );
        let count: i64 = sqlx::query_scalar(&count_sql)
            .bind(search.as_str())
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            r#"
            SELECT
                s.store_id,
                p.product_id, p.product_name, p.brand_id, p.category_id,
                p.model_year, p.list_price_cents, s.quantity
            FROM stocks s
            JOIN products p ON p.product_id = s.product_id
            WHERE {STOCK_SEARCH}
              AND s.store_id IN (
                SELECT DISTINCT s.store_id
                FROM stocks s
                JOIN products p ON p.product_id = s.product_id
                WHERE {STOCK_SEARCH}
                ORDER BY s.store_id
                LIMIT ?2 OFFSET ?3
              )
            ORDER BY s.store_id, p.product_id
            "#
        );
        let lines = sqlx::query_as::<_, StoreStockLine>(&page_sql)
            .bind(search.as_str())
            .bind(req.limit())
            .bind(req.offset())
            .fetch_all(&self.pool)
            .await?;

        let stocks = group_by_store(lines);

        debug!(count, returned = stocks.len(), search = %search, "Listed stock");
        Ok(StockListResponse { count, stocks })
    }

    /// Sets the quantity of an existing `(store, product)` record.
    pub async fn update(&self, stock: &UpdateStock) -> DbResult<()> {
        stock.validate()?;

        let result = sqlx::query(
            "UPDATE stocks SET quantity = ?3 WHERE store_id = ?1 AND product_id = ?2",
        )
        .bind(stock.store_id)
        .bind(stock.product_id)
        .bind(stock.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Stock",
                format!("store {} product {}", stock.store_id, stock.product_id),
            ));
        }

        debug!(
            store_id = stock.store_id,
            product_id = stock.product_id,
            quantity = stock.quantity,
            "Stock updated"
        );
        Ok(())
    }

    /// Deletes a store's stock: one product when `product_id` is set,
    /// every product otherwise.
    ///
    /// ## Returns
    /// Number of records deleted (never zero; zero is `NotFound`).
    pub async fn delete(&self, key: &StockPrimaryKey) -> DbResult<u64> {
        key.validate()?;

        let result = sqlx::query(
            "DELETE FROM stocks WHERE store_id = ?1 AND (?2 IS NULL OR product_id = ?2)",
        )
        .bind(key.store_id)
        .bind(key.product_id)
        .execute(&self.pool)
        .await?;

        let deleted = result.rows_affected();
        if deleted == 0 {
            let id = match key.product_id {
                Some(product_id) => format!("store {} product {}", key.store_id, product_id),
                None => format!("store {}", key.store_id),
            };
            return Err(DbError::not_found("Stock", id));
        }

        debug!(store_id = key.store_id, product_id = ?key.product_id, deleted, "Stock deleted");
        Ok(deleted)
    }

    /// Moves `quantity` units of a product from one store to another.
    ///
    /// Both sides change in one transaction or neither does. Every early
    /// return drops `tx` uncommitted, which rolls it back.
    ///
    /// ## Errors
    /// * `DbError::Rejected(Validation)` - bad input, nothing opened
    /// * `DbError::NotFound` - source has no record for the product
    /// * `DbError::Rejected(InsufficientStock)` - source holds too little
    /// * `DbError::ForeignKeyViolation` - destination store does not exist
    /// * anything else from SQLite, unchanged
    pub async fn transfer(&self, req: &TransferRequest) -> DbResult<()> {
        req.validate()?;

        debug!(
            from_store_id = req.from_store_id,
            to_store_id = req.to_store_id,
            product_id = req.product_id,
            quantity = req.quantity,
            "Transferring stock"
        );

        let mut tx = self.pool.begin().await?;

        let debited = sqlx::query(
            r#"
            UPDATE stocks
            SET quantity = quantity - ?1
            WHERE store_id = ?2 AND product_id = ?3 AND quantity >= ?1
            "#,
        )
        .bind(req.quantity)
        .bind(req.from_store_id)
        .bind(req.product_id)
        .execute(&mut *tx)
        .await?;

        if debited.rows_affected() == 0 {
            let available: Option<i64> = sqlx::query_scalar(
                "SELECT quantity FROM stocks WHERE store_id = ?1 AND product_id = ?2",
            )
            .bind(req.from_store_id)
            .bind(req.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            // The rejection wins over a failed rollback; dropping `tx` undoes it anyway.
            let _ = tx.rollback().await;

            return Err(match available {
                None => DbError::not_found(
                    "Stock",
                    format!("store {} product {}", req.from_store_id, req.product_id),
                ),
                Some(available) => CoreError::InsufficientStock {
                    store_id: req.from_store_id,
                    product_id: req.product_id,
                    available,
                    requested: req.quantity,
                }
                .into(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO stocks (store_id, product_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (store_id, product_id)
            DO UPDATE SET quantity = stocks.quantity + excluded.quantity
            "#,
        )
        .bind(req.to_store_id)
        .bind(req.product_id)
        .bind(req.quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            from_store_id = req.from_store_id,
            to_store_id = req.to_store_id,
            product_id = req.product_id,
            "Stock transfer committed"
        );
        Ok(())
    }
}

/// Folds store-ordered lines into one summary per store.
fn group_by_store(lines: Vec<StoreStockLine>) -> Vec<StoreStock> {
    let mut grouped: Vec<(i64, Vec<StockProduct>)> = Vec::new();

    for line in lines {
        if let Some((store_id, products)) = grouped.last_mut() {
            if *store_id == line.store_id {
                products.push(line.product);
                continue;
            }
        }
        grouped.push((line.store_id, vec![line.product]));
    }

    grouped
        .into_iter()
        .map(|(store_id, products)| StoreStock::new(store_id, products))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::test_support::{seed_catalog, seeded_db};

    fn transfer(from: i64, to: i64, product_id: i64, quantity: i64) -> TransferRequest {
        TransferRequest {
            from_store_id: from,
            to_store_id: to,
            product_id,
            quantity,
        }
    }

    async fn put(repo: &StockRepository, store_id: i64, product_id: i64, quantity: i64) {
        repo.create(&CreateStock {
            store_id,
            product_id,
            quantity,
        })
        .await
        .unwrap();
    }

    async fn quantity(repo: &StockRepository, store_id: i64, product_id: i64) -> Option<i64> {
        repo.get_record(store_id, product_id)
            .await
            .unwrap()
            .map(|r| r.quantity)
    }

    // -------------------------------------------------------------------------
    // Transfer
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_transfer_creates_destination_record() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;

        repo.transfer(&transfer(1, 2, 1, 4)).await.unwrap();

        assert_eq!(quantity(&repo, 1, 1).await, Some(6));
        assert_eq!(quantity(&repo, 2, 1).await, Some(4));
    }

    #[tokio::test]
    async fn test_transfer_insufficient_stock_changes_nothing() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 3).await;

        let err = repo.transfer(&transfer(1, 2, 1, 4)).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Rejected(CoreError::InsufficientStock {
                store_id: 1,
                product_id: 1,
                available: 3,
                requested: 4,
            })
        ));
        assert_eq!(quantity(&repo, 1, 1).await, Some(3));
        assert_eq!(quantity(&repo, 2, 1).await, None);
    }

    #[tokio::test]
    async fn test_rejected_transfer_releases_connection() {
        // in_memory() pools hold a single connection
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 3).await;

        for _ in 0..3 {
            assert!(matches!(
                repo.transfer(&transfer(1, 2, 1, 4)).await,
                Err(DbError::Rejected(CoreError::InsufficientStock { .. }))
            ));
            assert!(matches!(
                repo.transfer(&transfer(2, 1, 1, 1)).await,
                Err(DbError::NotFound { .. })
            ));
        }

        repo.transfer(&transfer(1, 2, 1, 3)).await.unwrap();
        assert_eq!(quantity(&repo, 1, 1).await, Some(0));
        assert_eq!(quantity(&repo, 2, 1).await, Some(3));
    }

    #[tokio::test]
    async fn test_transfer_adds_to_existing_destination() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;
        put(&repo, 2, 1, 5).await;

        repo.transfer(&transfer(1, 2, 1, 2)).await.unwrap();

        assert_eq!(quantity(&repo, 1, 1).await, Some(8));
        assert_eq!(quantity(&repo, 2, 1).await, Some(7));
    }

    #[tokio::test]
    async fn test_transfer_entire_balance_keeps_zero_record() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 5).await;

        repo.transfer(&transfer(1, 2, 1, 5)).await.unwrap();

        assert_eq!(quantity(&repo, 1, 1).await, Some(0));
        assert_eq!(quantity(&repo, 2, 1).await, Some(5));
    }

    #[tokio::test]
    async fn test_transfer_missing_source_is_not_found() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();

        let err = repo.transfer(&transfer(1, 2, 1, 1)).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(quantity(&repo, 2, 1).await, None);
    }

    #[tokio::test]
    async fn test_transfer_rejects_bad_input() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;

        for req in [
            transfer(1, 2, 1, 0),
            transfer(1, 2, 1, -3),
            transfer(1, 1, 1, 2),
            transfer(-1, 2, 1, 2),
        ] {
            let err = repo.transfer(&req).await.unwrap_err();
            assert!(
                matches!(err, DbError::Rejected(CoreError::Validation(_))),
                "{:?}",
                req
            );
        }

        assert_eq!(quantity(&repo, 1, 1).await, Some(10));
    }

    #[tokio::test]
    async fn test_failed_credit_rolls_back_debit() {
        let db = seeded_db(1, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;

        // Store 99 does not exist: the debit succeeds, the credit fails.
        let err = repo.transfer(&transfer(1, 99, 1, 4)).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(quantity(&repo, 1, 1).await, Some(10));
    }

    #[tokio::test]
    async fn test_transfers_conserve_total_and_stay_non_negative() {
        let db = seeded_db(3, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;
        put(&repo, 2, 1, 5).await;

        let moves = [
            (1, 2, 3),
            (2, 3, 8),
            (3, 1, 1),
            (1, 3, 20),
            (3, 2, 7),
            (2, 1, 10),
        ];
        for (from, to, qty) in moves {
            // Some of these are expected to fail
            let _ = repo.transfer(&transfer(from, to, 1, qty)).await;

            let mut total = 0;
            for store in 1..=3 {
                let q = quantity(&repo, store, 1).await.unwrap_or(0);
                assert!(q >= 0);
                total += q;
            }
            assert_eq!(total, 15);
        }
    }

    #[tokio::test]
    async fn test_same_transfer_twice_applies_twice() {
        let db = seeded_db(2, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;

        let req = transfer(1, 2, 1, 3);
        repo.transfer(&req).await.unwrap();
        repo.transfer(&req).await.unwrap();

        assert_eq!(quantity(&repo, 1, 1).await, Some(4));
        assert_eq!(quantity(&repo, 2, 1).await, Some(6));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transfers_cannot_overdraw() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("stock.db")).max_connections(4))
            .await
            .unwrap();
        seed_catalog(&db, 3, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 10).await;

        let first = tokio::spawn({
            let repo = db.stock();
            async move { repo.transfer(&transfer(1, 2, 1, 6)).await }
        });
        let second = tokio::spawn({
            let repo = db.stock();
            async move { repo.transfer(&transfer(1, 3, 1, 6)).await }
        });
        let results = [first.await.unwrap(), second.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let failure = results.into_iter().find_map(Result::err).unwrap();
        assert!(matches!(
            failure,
            DbError::Rejected(CoreError::InsufficientStock {
                available: 4,
                requested: 6,
                ..
            })
        ));

        assert_eq!(quantity(&repo, 1, 1).await, Some(4));
        let moved_to_2 = quantity(&repo, 2, 1).await.unwrap_or(0);
        let moved_to_3 = quantity(&repo, 3, 1).await.unwrap_or(0);
        assert_eq!(moved_to_2 + moved_to_3, 6);

        db.close().await;
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_duplicate_pair_is_unique_violation() {
        let db = seeded_db(1, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 2).await;

        let err = repo
            .create(&CreateStock {
                store_id: 1,
                product_id: 1,
                quantity: 9,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_create_negative_quantity_is_rejected() {
        let db = seeded_db(1, 1).await;
        let err = db
            .stock()
            .create(&CreateStock {
                store_id: 1,
                product_id: 1,
                quantity: -1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_get_by_store_sums_products() {
        let db = seeded_db(2, 3).await;
        let repo = db.stock();
        put(&repo, 1, 1, 4).await;
        put(&repo, 1, 3, 11).await;
        put(&repo, 2, 2, 1).await;

        let summary = repo.get_by_store(1).await.unwrap().unwrap();
        assert_eq!(summary.store_id, 1);
        assert_eq!(summary.quantity, 15);
        assert_eq!(summary.products.len(), 2);
        assert_eq!(summary.products[1].product_name, "Trek Marlin 3");

        assert!(repo.get_by_store(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_groups_and_pages_by_store() {
        let db = seeded_db(3, 2).await;
        let repo = db.stock();
        for store in 1..=3 {
            put(&repo, store, 1, 1).await;
            put(&repo, store, 2, 2).await;
        }

        let page = repo
            .list(&ListRequest::new(Some(1), Some(1), None))
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.stocks.len(), 1);
        assert_eq!(page.stocks[0].store_id, 2);
        assert_eq!(page.stocks[0].products.len(), 2);
        assert_eq!(page.stocks[0].quantity, 3);

        let page = repo.list(&ListRequest::default()).await.unwrap();
        assert_eq!(page.stocks.len(), 3);
    }

    #[tokio::test]
    async fn test_list_search_filters_products() {
        let db = seeded_db(2, 0).await;
        let catalog = db.catalog();
        for name in ["Electra Cruiser", "Surly Wednesday", "Electra Townie"] {
            catalog
                .create_product(&bikeshop_core::CreateProduct {
                    product_name: name.to_string(),
                    model_year: 2022,
                    list_price_cents: 39_999,
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        let repo = db.stock();
        put(&repo, 1, 1, 1).await;
        put(&repo, 1, 2, 1).await;
        put(&repo, 2, 2, 1).await;
        put(&repo, 2, 3, 1).await;

        let page = repo
            .list(&ListRequest::new(None, None, Some("Electra".to_string())))
            .await
            .unwrap();
        assert_eq!(page.count, 2);
        assert!(page
            .stocks
            .iter()
            .all(|s| s.products.len() == 1 && s.products[0].product_name.starts_with("Electra")));

        let page = repo
            .list(&ListRequest::new(None, None, Some("') OR 1=1 --".to_string())))
            .await
            .unwrap();
        assert_eq!(page.count, 0);
        assert!(page.stocks.is_empty());
    }

    #[tokio::test]
    async fn test_list_search_wildcards_match_literally() {
        let db = seeded_db(1, 1).await;
        db.catalog()
            .create_product(&bikeshop_core::CreateProduct {
                product_name: "Helmet_100% Recycled".to_string(),
                model_year: 2023,
                list_price_cents: 5_999,
                ..Default::default()
            })
            .await
            .unwrap();
        let repo = db.stock();
        put(&repo, 1, 1, 2).await;

        // Only "Trek Marlin 1" is stocked: no literal % or _ in it
        for term in ["%", "_", "%%", "Trek_Marlin"] {
            let page = repo
                .list(&ListRequest::new(None, None, Some(term.to_string())))
                .await
                .unwrap();
            assert_eq!(page.count, 0, "term {:?}", term);
        }

        put(&repo, 1, 2, 1).await;
        for term in ["%", "_", "100%", "Helmet_"] {
            let page = repo
                .list(&ListRequest::new(None, None, Some(term.to_string())))
                .await
                .unwrap();
            assert_eq!(page.count, 1, "term {:?}", term);
            assert_eq!(page.stocks[0].products.len(), 1);
            assert_eq!(page.stocks[0].products[0].product_id, 2);
        }
    }

    #[tokio::test]
    async fn test_update_sets_quantity() {
        let db = seeded_db(1, 1).await;
        let repo = db.stock();
        put(&repo, 1, 1, 2).await;

        repo.update(&UpdateStock {
            store_id: 1,
            product_id: 1,
            quantity: 0,
        })
        .await
        .unwrap();
        assert_eq!(quantity(&repo, 1, 1).await, Some(0));

        let err = repo
            .update(&UpdateStock {
                store_id: 1,
                product_id: 2,
                quantity: 5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_one_product_or_whole_store() {
        let db = seeded_db(2, 3).await;
        let repo = db.stock();
        for product in 1..=3 {
            put(&repo, 1, product, 1).await;
        }
        put(&repo, 2, 1, 1).await;

        let deleted = repo
            .delete(&StockPrimaryKey {
                store_id: 1,
                product_id: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(deleted, 1);

        let deleted = repo
            .delete(&StockPrimaryKey {
                store_id: 1,
                product_id: None,
            })
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(repo.get_by_store(1).await.unwrap().is_none());
        assert_eq!(quantity(&repo, 2, 1).await, Some(1));

        let err = repo
            .delete(&StockPrimaryKey {
                store_id: 1,
                product_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
