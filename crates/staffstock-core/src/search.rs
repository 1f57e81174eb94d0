//! # Product Search Matching
//!
//! Case-insensitive substring matching over the text a product is shown as.
//!
//! ## What Gets Matched
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Query "wid" (trimmed, lowercased)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────┬──────────┬──────────┬──────────┐                         │
//! │  │   name   │ category │  price   │ quantity │                         │
//! │  │ "widget" │ "tools"  │ "9.99"   │ "5"      │  ◄── any field hits     │
//! │  └──────────┴──────────┴──────────┴──────────┘                         │
//! │                                                                         │
//! │  Numbers match as TEXT: "10" hits price 100.0 ("100.0")                │
//! │  Empty query hits every product                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::ProductSummary;

/// Renders a price the way it is listed and searched.
///
/// Whole values keep one decimal place (`100.0`, `0.0`); everything else uses
/// the shortest text that reads back as the same value (`9.99`). Magnitudes
/// below `1e-4` or from `1e16` up switch to exponent form with a signed,
/// two-digit exponent (`1e-05`, `1.5e+20`).
///
/// ## Example
/// ```rust
/// use staffstock_core::search::format_price;
///
/// assert_eq!(format_price(100.0), "100.0");
/// assert_eq!(format_price(9.99), "9.99");
/// assert_eq!(format_price(1e16), "1e+16");
/// ```
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return price.to_string();
    }

    let magnitude = price.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return exponent_form(price);
    }

    if price.fract() == 0.0 {
        format!("{:.1}", price)
    } else {
        price.to_string()
    }
}

/// `1.5e20` -> `1.5e+20`, `1e-5` -> `1e-05`
fn exponent_form(price: f64) -> String {
    let shortest = format!("{:e}", price);

    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

/// Normalizes a raw search box value: trims and lowercases.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

impl ProductSummary {
    /// Checks whether this product matches an already normalized query.
    ///
    /// See [`normalize_query`]. An empty query matches everything.
    pub fn matches(&self, normalized_query: &str) -> bool {
        if normalized_query.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(normalized_query)
            || self.category.to_lowercase().contains(normalized_query)
            || format_price(self.price).contains(normalized_query)
            || self.quantity.to_string().contains(normalized_query)
    }
}

/// Filters products by a raw query, keeping their order.
pub fn filter_products(products: Vec<ProductSummary>, query: &str) -> Vec<ProductSummary> {
    let needle = normalize_query(query);
    products.into_iter().filter(|p| p.matches(&needle)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str, price: f64, quantity: i64) -> ProductSummary {
        ProductSummary {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "0.0");
        assert_eq!(format_price(100.0), "100.0");
        assert_eq!(format_price(9.99), "9.99");
        assert_eq!(format_price(0.1), "0.1");
        assert_eq!(format_price(0.0001), "0.0001");
        assert_eq!(format_price(9999999999999998.0), "9999999999999998.0");
    }

    #[test]
    fn test_format_price_exponent_form() {
        assert_eq!(format_price(1e16), "1e+16");
        assert_eq!(format_price(1.5e20), "1.5e+20");
        assert_eq!(format_price(1e-5), "1e-05");
        assert_eq!(format_price(2.5e-7), "2.5e-07");
        assert_eq!(format_price(1e100), "1e+100");
    }

    #[test]
    fn test_matches_exponent_text() {
        let huge = product(1, "Mainframe", "Hardware", 1e16, 1);
        assert!(huge.matches("e+16"));
        assert!(!huge.matches("10000000000000000"));

        let tiny = product(2, "Grain", "Food", 1e-5, 1);
        assert!(tiny.matches("1e-05"));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let widget = product(1, "Widget", "Tools", 9.99, 5);
        assert!(widget.matches(&normalize_query("WID")));
        assert!(widget.matches(&normalize_query("tOoLs")));
        assert!(!widget.matches(&normalize_query("gadget")));
    }

    #[test]
    fn test_matches_numbers_as_text() {
        let p = product(1, "Cable", "Electronics", 100.0, 42);
        assert!(p.matches("10"));
        assert!(p.matches("100.0"));
        assert!(p.matches("42"));
        assert!(!p.matches("43"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let products = vec![
            product(1, "A", "X", 1.0, 1),
            product(2, "B", "Y", 2.0, 2),
        ];
        assert_eq!(filter_products(products.clone(), "   "), products);
    }

    #[test]
    fn test_filter_keeps_order() {
        let products = vec![
            product(3, "Red pen", "Office", 1.5, 10),
            product(1, "Blue pen", "Office", 1.5, 10),
            product(2, "Stapler", "Office", 7.0, 3),
        ];
        let ids: Vec<i64> = filter_products(products, "PEN").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
