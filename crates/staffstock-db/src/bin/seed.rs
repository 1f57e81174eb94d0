//! # Seed Data Generator
//!
//! Populates a store with sample records for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./staffstock_dev.db
//! cargo run -p staffstock-db --bin seed
//!
//! # Specify database path
//! cargo run -p staffstock-db --bin seed -- --db ./data/staffstock.db
//! ```
//!
//! ## Generated Records
//! - Employees across a few departments
//! - Categories, each with a handful of products
//! - Products reference categories by name; prices and quantities vary,
//!   including the zero boundary

use std::env;
use std::process::ExitCode;

use staffstock_core::{NewCategory, NewEmployee, NewProduct};
use staffstock_db::{Database, DbConfig, DbResult};

/// (name, email, department)
const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Test Employee", "test@example.com", "Test Department"),
    ("Mona Adel", "mona.adel@example.com", "Sales"),
    ("Karim Fathy", "karim.fathy@example.com", "Warehouse"),
    ("Salma Nabil", "salma.nabil@example.com", "Accounting"),
    ("Omar Hany", "omar.hany@example.com", "Support"),
];

/// (category, [(product, price, quantity)])
const CATALOG: &[(&str, &[(&str, &str, &str)])] = &[
    ("Test Category", &[("Test Product", "99.99", "10")]),
    (
        "Receivers",
        &[
            ("HD Receiver", "850", "12"),
            ("4K Receiver", "1450.5", "4"),
            ("Mini Receiver", "420", "0"),
        ],
    ),
    (
        "Dishes",
        &[
            ("Dish 60cm", "300", "25"),
            ("Dish 90cm", "510", "9"),
            ("Dish 120cm", "980", "2"),
        ],
    ),
    (
        "Accessories",
        &[
            ("Coax Cable 10m", "45.75", "100"),
            ("F Connector", "1.5", "1000"),
            ("LNB Single", "120", "30"),
            ("Sample Sticker", "0", "50"),
        ],
    ),
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let mut db_path = "./staffstock_dev.db".to_string();

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
                println!("Staffstock Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./staffstock_dev.db)");
                println!("  -h, --help         Show this help message");
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    match seed(&db_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn seed(db_path: &str) -> DbResult<()> {
    println!("🌱 Staffstock Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(DbConfig::new(db_path)).await?;
    println!("✓ Store opened, schema ready");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    for (name, email, department) in EMPLOYEES {
        db.employees()
            .insert(&NewEmployee::new(*name, *email, *department))
            .await?;
    }
    println!("✓ {} employees", EMPLOYEES.len());

    let mut products = 0;
    for (category, items) in CATALOG {
        db.categories().insert(&NewCategory::new(*category)).await?;

        for (name, price, quantity) in items.iter() {
            if let Err(e) = db
                .products()
                .insert(&NewProduct::new(*name, *category, price, quantity))
                .await
            {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            products += 1;
        }
    }
    println!("✓ {} categories, {} products", CATALOG.len(), products);

    println!();
    println!("✓ Seeded in {:?}", start.elapsed());

    // Verify search
    let hits = db.products().search("receiver").await?;
    println!("  Search 'receiver': {} results", hits.len());

    let stats = db.table_stats(0).await?;
    for table in &stats.tables {
        println!("  {}: {} rows", table.table, table.rows);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
