//! # Seed Data Generator
//!
//! Populates a database with a demo catalog and warehouse stock.
//!
//! ## Usage
//! ```bash
//! # Seed ./haulage_dev.db with 3 warehouses
//! cargo run -p haulage-db --bin seed
//!
//! # Custom warehouse count and database
//! cargo run -p haulage-db --bin seed -- --warehouses 5 --db ./data/haulage.db
//! ```
//!
//! Every catalog entry is stocked in every warehouse; the held quantity
//! varies with the warehouse so the stock reports differ.

use std::env;

use haulage_core::{Grams, Product, StockAlteration};
use haulage_db::{Database, DbConfig};

/// Demo catalog: (GTIN, name, unit weight in kilograms).
const CATALOG: &[(&str, &str, f64)] = &[
    ("0000", "Pallet of bricks", 900.0),
    ("0001", "Bag of sand (25 kg)", 25.0),
    ("0002", "Bag of cement (50 kg)", 50.0),
    ("0003", "Steel beam (6 m)", 480.0),
    ("0004", "Roof tiles (pack of 20)", 60.0),
    ("0005", "Timber plank", 12.5),
    ("0006", "Plasterboard sheet", 18.0),
    ("0007", "Box of screws", 2.0),
    ("0008", "Paint tin (10 l)", 13.0),
    ("0009", "Product leaflets", 0.005),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut warehouses: i64 = 3;
    let mut db_path = String::from("./haulage_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--warehouses" | "-w" => {
                if i + 1 < args.len() {
                    warehouses = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Haulage Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -w, --warehouses <N>  Number of warehouses to stock (default: 3)");
                println!("  -d, --db <PATH>       Database file path (default: ./haulage_dev.db)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Haulage Seed Data Generator");
    println!("===========================");
    println!("Database:   {}", db_path);
    println!("Warehouses: {}", warehouses);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut products = Vec::with_capacity(CATALOG.len());
    for (gtin, name, kilograms) in CATALOG {
        let product = Product::new(*gtin, *name, Grams::from_kilograms(*kilograms));
        db.products().insert(&product).await?;
        products.push(product);
    }
    println!("✓ Inserted {} products", products.len());

    for warehouse_id in 1..=warehouses {
        let alterations: Vec<StockAlteration> = products
            .iter()
            .enumerate()
            .map(|(idx, product)| {
                let held = 10 * (idx as i64 + 1) * warehouse_id;
                StockAlteration::new(&product.id, held)
            })
            .collect();

        db.stock().add_stock(warehouse_id, &alterations).await?;
        println!("✓ Stocked warehouse {}", warehouse_id);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
