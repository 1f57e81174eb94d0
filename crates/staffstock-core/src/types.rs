//! # Domain Types
//!
//! Records and form inputs used throughout Staffstock.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Employee     │   │    Category     │   │   ProductSummary     │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)            │  │
//! │  │  name           │   │  name (UNIQUE)  │   │  name                │  │
//! │  │  email          │   └─────────────────┘   │  category (by name)  │  │
//! │  │  department     │            ▲            │  price (f64)         │  │
//! │  └─────────────────┘            │            │  quantity (i64)      │  │
//! │                                 └ ─ ─ ─ ─ ─ ─│  (image kept apart)  │  │
//! │                        name copy, no FK      └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Inputs vs Records
//! `New*` types carry what a form submits. Product price and quantity arrive
//! as text and only become numbers in [`crate::validation::validate_product`],
//! which yields a [`ProductDraft`]. Records carry the identity assigned by the
//! store.

use serde::{Deserialize, Serialize};

/// Identity assigned by the store: auto-incrementing, unique per table.
pub type RecordId = i64;

// =============================================================================
// Employee
// =============================================================================

/// A stored employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    /// Free text; no format check.
    pub email: String,
    pub department: String,
}

/// Employee form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        NewEmployee {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A stored product category. Names are unique across all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: RecordId,
    pub name: String,
}

/// Category form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        NewCategory { name: name.into() }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stored product without its image payload.
///
/// `category` is a copy of a category name, not a reference: deleting the
/// category leaves this value untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSummary {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

/// Product form input.
///
/// Price and quantity are kept as the text the user typed; see
/// [`crate::validation::validate_product`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    /// Raw image bytes, if one was staged.
    #[serde(default, skip_serializing)]
    pub image: Option<Vec<u8>>,
}

impl NewProduct {
    /// Creates a product form without an image.
    ///
    /// ## Example
    /// ```rust
    /// use staffstock_core::NewProduct;
    ///
    /// let form = NewProduct::new("Widget", "Tools", 9.99, 5).with_image(vec![0x89, 0x50]);
    /// assert_eq!(form.price, "9.99");
    /// assert!(form.image.is_some());
    /// ```
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl ToString,
        quantity: impl ToString,
    ) -> Self {
        NewProduct {
            name: name.into(),
            category: category.into(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            image: None,
        }
    }

    /// Attaches image bytes.
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

/// A product that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    /// Non-negative and finite.
    pub price: f64,
    /// Non-negative.
    pub quantity: i64,
    /// `None` when no image was staged or the staged payload was empty.
    pub image: Option<Vec<u8>>,
}

// =============================================================================
// Unit Tests
// =============================================================================
