//! # Seed Data Generator
//!
//! Fills a store with generated products and exercises the repository.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default)
//! cargo run -p shelf-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-db --bin seed -- --count 1000
//!
//! # More logging
//! RUST_LOG=debug cargo run -p shelf-db --bin seed
//! ```
//!
//! The store name comes from `SHELF_STORE_NAME`. The store is in memory,
//! so nothing outlives the process.

use chrono::{Duration, Utc};
use shelf_core::Product;
use shelf_db::repository::product::generate_product_id;
use shelf_db::{Repository, Store, StoreConfig};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Product names for generated data
const NAMES: &[&str] = &[
    "Coffee Mug",
    "Tea Kettle",
    "Notebook",
    "Desk Lamp",
    "Water Bottle",
    "Backpack",
    "Headphones",
    "Phone Stand",
    "Pen Set",
    "Plant Pot",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 100)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = StoreConfig::from_env();
    let store = Store::new(config);
    if !store.is_started() {
        store.start();
    }

    let products = store.products();

    if count == 0 {
        info!("Nothing to seed");
        store.stop();
        return Ok(());
    }

    info!(store = %store.name(), count, "Generating products");
    for seed in 0..count {
        products.create(generate_product(seed))?;
    }

    let all = products.find_all()?;
    info!(stored = all.len(), "Seeded products");

    let mut deleted: usize = 0;
    for product in all.iter().step_by(2) {
        if products.delete(&product.product_id)? {
            deleted += 1;
        }
    }

    let remaining = products.count()?;
    info!(deleted, remaining, "Deleted every other product");

    if let Some(survivor) = all.get(1) {
        let mut repriced = products.find_by_id(&survivor.product_id)?;
        repriced.price += 1.0;
        repriced.touch(Utc::now());
        let repriced = products.update(&survivor.product_id, repriced)?;
        info!(id = %repriced.product_id, price = repriced.price, "Repriced product");
    }

    store.stop();
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every repository call
/// - Default: INFO, DEBUG for shelf crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelf_db=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Generates a single product with deterministic data.
fn generate_product(seed: usize) -> Product {
    let created = Utc::now() - Duration::days((seed % 30) as i64);

    let name = NAMES[seed % NAMES.len()];
    let price = 1.99 + ((seed * 17) % 800) as f64 / 100.0;

    Product::new(
        generate_product_id(),
        format!("{} #{}", name, seed),
        format!("Generated {} for local testing", name.to_lowercase()),
        price,
        created,
        created,
    )
}
