//! # Repository Module
//!
//! Record repositories for Staffstock.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Adapter command                                                       │
//! │       │                                                                 │
//! │       │  db.categories().insert(&NewCategory::new("Tools"))            │
//! │       ▼                                                                 │
//! │  CategoryRepository                                                    │
//! │  ├── validate (staffstock-core)                                        │
//! │  ├── open connection                                                   │
//! │  ├── one SQL statement                                                 │
//! │  └── close connection                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared Contract
//! Every repository exposes `insert`, `list` (ascending id) and
//! `delete_by_id`. Deleting an id that does not exist is a no-op.
//! Records are never updated in place.
//!
//! ## Available Repositories
//!
//! - [`EmployeeRepository`](employee::EmployeeRepository)
//! - [`CategoryRepository`](category::CategoryRepository) - unique names
//! - [`ProductRepository`](product::ProductRepository) - search and image bytes

pub mod category;
pub mod employee;
pub mod product;
