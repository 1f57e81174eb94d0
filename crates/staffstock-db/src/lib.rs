//! # staffstock-db: Storage Layer for Staffstock
//!
//! Storage schema and record repositories over a single local SQLite file,
//! accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Staffstock Data Flow                             │
//! │                                                                         │
//! │  Adapter command (product search)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  staffstock-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │    │   Schema    │   │   │
//! │  │   │ (database.rs) │    │                │    │ (schema.rs) │   │   │
//! │  │   │               │    │ EmployeeRepo   │    │             │   │   │
//! │  │   │ options only, │◄───│ CategoryRepo   │    │ CREATE IF   │   │   │
//! │  │   │ 1 conn per op │    │ ProductRepo    │    │ NOT EXISTS  │   │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/staffstock/staffstock.db  (+ images/)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`database`] - Store configuration and the explicit handle
//! - [`schema`] - Table definitions, idempotent creation
//! - [`error`] - Database error types
//! - [`repository`] - Employee, category and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use staffstock_db::{Database, DbConfig};
//! use staffstock_core::NewCategory;
//!
//! let db = Database::open(DbConfig::new("path/to/staffstock.db")).await?;
//!
//! let id = db.categories().insert(&NewCategory::new("Tools")).await?;
//! let products = db.products().search("wid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod database;
pub mod error;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use database::{ColumnInfo, Database, DbConfig, StoreStats, TableStats};
pub use error::{DbError, DbResult};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::employee::EmployeeRepository;
pub use repository::product::ProductRepository;
