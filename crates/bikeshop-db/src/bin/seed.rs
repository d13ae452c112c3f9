//! # Seed Data Generator
//!
//! Populates the database with a small bike shop for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./bikeshop.db
//! cargo run -p bikeshop-db --bin seed
//!
//! # Specify database path
//! cargo run -p bikeshop-db --bin seed -- --db ./data/bikeshop.db
//! ```
//!
//! ## Generated Data
//! - 3 stores
//! - every model in `MODELS` for each model year in `MODEL_YEARS`
//! - stock for each (store, product) pair: 0 - 30 units
//! - one manager per store plus two reports each
//! - a handful of promo codes

use bikeshop_core::{
    CreateProduct, CreatePromo, CreateStaff, CreateStock, CreateStore, DiscountType,
};
use bikeshop_db::migrations::migration_status;
use bikeshop_db::{Database, DbConfig};
use std::env;

/// (name, city, state, zip)
const STORES: &[(&str, &str, &str, &str)] = &[
    ("Santa Cruz Bikes", "Santa Cruz", "CA", "95060"),
    ("Baldwin Bikes", "Baldwin", "NY", "11432"),
    ("Rowlett Bikes", "Rowlett", "TX", "75088"),
];

/// (name, brand_id, category_id, base price in cents)
const MODELS: &[(&str, i64, i64, i64)] = &[
    ("Trek 820", 9, 6, 37_999),
    ("Trek Marlin 5", 9, 6, 54_999),
    ("Trek Fuel EX 8", 9, 6, 329_999),
    ("Electra Townie Original 7D", 1, 3, 54_999),
    ("Electra Cruiser 1", 1, 3, 26_999),
    ("Surly Wednesday Frameset", 8, 6, 99_999),
    ("Surly Straggler", 8, 4, 154_999),
    ("Heller Shagamaw Frame", 3, 6, 132_000),
    ("Sun Bicycles Cruz 3", 7, 3, 44_999),
    ("Haro SR 1.1", 2, 6, 53_999),
    ("Ritchey Timberwolf Frameset", 6, 6, 74_999),
    ("Pure Cycles Vine 8-Speed", 5, 3, 42_999),
];

const MODEL_YEARS: &[i64] = &[2022, 2023, 2024];

/// (first, last) per store: the first entry manages the other two.
const STAFF: &[[(&str, &str); 3]] = &[
    [("Fabiola", "Jackson"), ("Mireya", "Copeland"), ("Genna", "Serrano")],
    [("Virgie", "Wiggins"), ("Jannette", "David"), ("Marcelene", "Boyer")],
    [("Venita", "Daniel"), ("Kali", "Vargas"), ("Layla", "Terrell")],
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bikeshop.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bike Shop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bikeshop.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bike Shop Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let (total, applied) = migration_status(db.pool()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied ({}/{})", applied, total);

    let catalog = db.catalog();
    let existing = catalog.list_stores().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} stores", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Stores
    let mut store_ids = Vec::with_capacity(STORES.len());
    for (name, city, state, zip) in STORES {
        let id = catalog
            .create_store(&CreateStore {
                store_name: name.to_string(),
                email: Some(format!(
                    "{}@bikes.shop",
                    name.to_lowercase().replace(' ', ".")
                )),
                city: Some(city.to_string()),
                state: Some(state.to_string()),
                zip_code: Some(zip.to_string()),
                ..Default::default()
            })
            .await?;
        store_ids.push(id);
    }
    println!("✓ {} stores", store_ids.len());

    // Products: newer model years cost a little more
    let mut product_ids = Vec::new();
    for (year_idx, year) in MODEL_YEARS.iter().enumerate() {
        for (name, brand_id, category_id, price) in MODELS {
            let id = catalog
                .create_product(&CreateProduct {
                    product_name: format!("{} - {}", name, year),
                    brand_id: Some(*brand_id),
                    category_id: Some(*category_id),
                    model_year: *year,
                    list_price_cents: price + year_idx as i64 * 2_000,
                })
                .await?;
            product_ids.push(id);
        }
    }
    println!("✓ {} products", product_ids.len());

    // Stock: deterministic spread, some pairs left at zero
    let stock = db.stock();
    let mut units = 0;
    for (store_idx, store_id) in store_ids.iter().enumerate() {
        for (product_idx, product_id) in product_ids.iter().enumerate() {
            let quantity = ((store_idx * 7 + product_idx * 13) % 31) as i64;
            stock
                .create(&CreateStock {
                    store_id: *store_id,
                    product_id: *product_id,
                    quantity,
                })
                .await?;
            units += quantity;
        }
    }
    println!("✓ {} units of stock", units);

    // Staff
    let staff = db.staff();
    let mut staff_count = 0;
    for (store_id, people) in store_ids.iter().zip(STAFF) {
        let mut manager_id = None;
        for (first, last) in people {
            let id = staff
                .create(&CreateStaff {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!("{}.{}@bikes.shop", first, last).to_lowercase(),
                    phone: None,
                    active: true,
                    store_id: *store_id,
                    manager_id,
                })
                .await?;
            manager_id.get_or_insert(id);
            staff_count += 1;
        }
    }
    println!("✓ {} staff", staff_count);

    // Promo codes
    let promos = [
        ("WELCOME10", 10, DiscountType::Percent, 0),
        ("SPRING15", 15, DiscountType::Percent, 50_000),
        ("TUNEUP25", 2_500, DiscountType::Fixed, 10_000),
        ("BIGRIDE100", 10_000, DiscountType::Fixed, 150_000),
    ];
    let promo_repo = db.promo_codes();
    for (name, discount, kind, limit) in promos {
        promo_repo
            .create(&CreatePromo {
                promo_name: name.to_string(),
                promo_discount: discount,
                promo_discount_type: kind,
                promo_order_limit_cents: limit,
            })
            .await?;
    }
    println!("✓ {} promo codes", promos.len());

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());

    db.close().await;
    Ok(())
}
