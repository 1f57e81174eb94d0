//! # Storage Schema
//!
//! The three record tables and their idempotent creation.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  employees                categories             products              │
//! │  ──────────────────────   ────────────────────   ───────────────────── │
//! │  id INTEGER PK AUTOINC    id INTEGER PK AUTOINC  id INTEGER PK AUTOINC │
//! │  name TEXT NOT NULL       name TEXT NOT NULL     name TEXT NOT NULL    │
//! │  email TEXT NOT NULL           UNIQUE            category TEXT NOT NULL│
//! │  department TEXT NOT NULL                        price REAL NOT NULL   │
//! │                                                  quantity INTEGER NN   │
//! │                                                  image BLOB (nullable) │
//! │                                                                         │
//! │  products.category holds a category NAME. No foreign key.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Evolution
//! There are no versioned migrations. Every statement is
//! `CREATE TABLE IF NOT EXISTS`, so initialization on an existing store is a
//! no-op. Changes must stay additive.

use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Names of the tables this crate manages, in creation order.
pub const TABLES: [&str; 3] = ["employees", "categories", "products"];

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    department TEXT NOT NULL
)
"#;

const CREATE_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)
"#;

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    price REAL NOT NULL,
    quantity INTEGER NOT NULL,
    image BLOB
)
"#;

/// Creates any missing table.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Never alters or drops an existing table
pub async fn init_schema(conn: &mut SqliteConnection) -> DbResult<()> {
    info!("Ensuring schema");

    for (table, statement) in TABLES
        .iter()
        .zip([CREATE_EMPLOYEES, CREATE_CATEGORIES, CREATE_PRODUCTS])
    {
        debug!(table = %table, "Creating table if missing");
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::SchemaFailed(format!("{}: {}", table, e)))?;
    }

    info!("Schema ready");
    Ok(())
}
