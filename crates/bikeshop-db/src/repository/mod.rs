//! # Repository Module
//!
//! Database repository implementations for the bike shop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.stock().transfer(&req)                                     │
//! │       ▼                                                                 │
//! │  StockRepository                                                       │
//! │  ├── create / get_by_store / list / update / delete                    │
//! │  └── transfer (single transaction)                                     │
//! │       │                                                                 │
//! │       │  Parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`staff::StaffRepository`] - Staff CRUD with store/manager resolution
//! - [`stock::StockRepository`] - Stock CRUD and transfers
//! - [`promo_code::PromoCodeRepository`] - Promo code CRUD
//! - [`catalog::CatalogRepository`] - Stores and products
//!
//! ## Search
//! List queries bind `ListRequest::search_pattern()` once and filter with
//! `(?1 = '' OR col LIKE '%' || ?1 || '%' ESCAPE '\')`. An empty term matches
//! everything, user input never reaches the SQL text, and `%`/`_` in the
//! term are literal characters.

pub mod catalog;
pub mod promo_code;
pub mod staff;
pub mod stock;

#[cfg(test)]
pub(crate) mod test_support {
    use bikeshop_core::{CreateProduct, CreateStore};

    use crate::pool::{Database, DbConfig};

    /// Fresh in-memory database with `stores` stores and `products` products.
    pub async fn seeded_db(stores: usize, products: usize) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_catalog(&db, stores, products).await;
        db
    }

    pub async fn seed_catalog(db: &Database, stores: usize, products: usize) {
        let catalog = db.catalog();
        for n in 1..=stores {
            catalog
                .create_store(&CreateStore {
                    store_name: format!("Store {}", n),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        for n in 1..=products {
            catalog
                .create_product(&CreateProduct {
                    product_name: format!("Trek Marlin {}", n),
                    model_year: 2024,
                    list_price_cents: 59_999,
                    ..Default::default()
                })
                .await
                .unwrap();
        }
    }
}
