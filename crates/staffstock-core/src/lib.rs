//! # staffstock-core: Pure Domain Logic for Staffstock
//!
//! Record types, form validation and product search matching, with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Staffstock Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Adapter (CLI)                      │   │
//! │  │   employee add ──► category list ──► product search / image     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ staffstock-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌───────────┐               │   │
//! │  │   │   types   │  │  validation  │  │  search   │               │   │
//! │  │   │ Employee  │  │  required    │  │ matches() │               │   │
//! │  │   │ Category  │  │  price, qty  │  │ price txt │               │   │
//! │  │   │ Product   │  │              │  │           │               │   │
//! │  │   └───────────┘  └──────────────┘  └───────────┘               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                staffstock-db (Record Repository)                │   │
//! │  │              SQLite schema, CRUD, image bytes                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records and form inputs (Employee, Category, Product)
//! - [`validation`] - Required-field and number checks for form input
//! - [`search`] - Case-insensitive product matching
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use staffstock_core::validation::validate_product;
//! use staffstock_core::NewProduct;
//!
//! let form = NewProduct::new("Widget", "Tools", "9.99", "5");
//! let draft = validate_product(&form).unwrap();
//!
//! assert_eq!(draft.price, 9.99);
//! assert_eq!(draft.quantity, 5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
