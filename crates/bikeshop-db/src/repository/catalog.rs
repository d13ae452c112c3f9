//! # Catalog Repository
//!
//! Stores and products. Staff and stock rows reference these through
//! foreign keys; the HTTP layer does not expose them directly, the seed
//! binary and the tests create them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bikeshop_core::{CreateProduct, CreateStore, Product, Store};

/// Repository for store and product rows.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a store and returns its id.
    pub async fn create_store(&self, store: &CreateStore) -> DbResult<i64> {
        store.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO stores (store_name, phone, email, street, city, state, zip_code)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(store.store_name.trim())
        .bind(&store.phone)
        .bind(&store.email)
        .bind(&store.street)
        .bind(&store.city)
        .bind(&store.state)
        .bind(&store.zip_code)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(store_id = id, "Store created");
        Ok(id)
    }

    /// Gets a store by id.
    pub async fn get_store(&self, store_id: i64) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT store_id, store_name, phone, email, street, city, state, zip_code
            FROM stores
            WHERE store_id = ?1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Lists every store ordered by id.
    pub async fn list_stores(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT store_id, store_name, phone, email, street, city, state, zip_code
            FROM stores
            ORDER BY store_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Inserts a product and returns its id.
    pub async fn create_product(&self, product: &CreateProduct) -> DbResult<i64> {
        product.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (product_name, brand_id, category_id, model_year, list_price_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.product_name.trim())
        .bind(product.brand_id)
        .bind(product.category_id)
        .bind(product.model_year)
        .bind(product.list_price_cents)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(product_id = id, "Product created");
        Ok(id)
    }

    /// Gets a product by id.
    pub async fn get_product(&self, product_id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT product_id, product_name, brand_id, category_id, model_year, list_price_cents
            FROM products
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}
