//! # Validation Module
//!
//! Turns raw form input into values the repository may store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Adapter (CLI flags / form fields)                            │
//! │  └── Collects text exactly as typed                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Trims text, rejects blanks                                        │
//! │  └── Parses price / quantity, rejects negatives                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE(categories.name)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failing field is reported, not just the first one.
//!
//! ## Usage
//! ```rust
//! use staffstock_core::validation::{parse_price, parse_quantity};
//!
//! assert_eq!(parse_price(" 9.99 ").unwrap(), 9.99);
//! assert!(parse_quantity("-1").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewCategory, NewEmployee, NewProduct, ProductDraft};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Example
/// ```rust
/// use staffstock_core::validation::validate_required;
///
/// assert_eq!(validate_required("name", "  Alice ").unwrap(), "Alice");
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(value.to_string())
}

/// Parses a price.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must parse as a finite decimal number (`NaN` and `inf` are rejected)
/// - Zero is allowed, negatives are not
/// - The parsed value is stored as-is: no currency rounding
pub fn parse_price(value: &str) -> ValidationResult<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::required("price"));
    }

    let price = trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: "price".to_string(),
            value: trimmed.to_string(),
        })?;

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    // "-0" parses to negative zero; store plain zero
    Ok(if price == 0.0 { 0.0 } else { price })
}

/// Parses a quantity.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must be a whole number (`"5.0"` is rejected)
/// - Zero is allowed, negatives are not
pub fn parse_quantity(value: &str) -> ValidationResult<i64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::required("quantity"));
    }

    let quantity: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            field: "quantity".to_string(),
            value: trimmed.to_string(),
        })?;

    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(quantity)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Collects per-field results so that every failing field gets reported.
#[derive(Default)]
struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    fn check<T: Default>(&mut self, result: ValidationResult<T>) -> T {
        result.unwrap_or_else(|e| {
            self.0.push(e);
            T::default()
        })
    }

    fn finish(self) -> ValidationResult<()> {
        match ValidationError::from_errors(self.0) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Validates an employee form and returns it with trimmed fields.
///
/// ## Rules
/// - name, email and department are required
/// - email gets no format check
pub fn validate_employee(input: &NewEmployee) -> ValidationResult<NewEmployee> {
    let mut errors = FieldErrors::default();

    let name = errors.check(validate_required("name", &input.name));
    let email = errors.check(validate_required("email", &input.email));
    let department = errors.check(validate_required("department", &input.department));

    errors.finish()?;

    Ok(NewEmployee {
        name,
        email,
        department,
    })
}

/// Validates a category form and returns it with a trimmed name.
///
/// Name uniqueness is a storage concern and is checked by the repository.
pub fn validate_category(input: &NewCategory) -> ValidationResult<NewCategory> {
    let name = validate_required("name", &input.name)?;
    Ok(NewCategory { name })
}

/// Validates a product form.
///
/// ## Rules
/// - name and category are required (category is not checked against the
///   stored categories)
/// - price: see [`parse_price`]
/// - quantity: see [`parse_quantity`]
/// - an empty image payload counts as no image
///
/// ## Example
/// ```rust
/// use staffstock_core::validation::validate_product;
/// use staffstock_core::NewProduct;
///
/// let err = validate_product(&NewProduct::new("", "Tools", "-1", "x")).unwrap_err();
/// assert_eq!(err.fields(), vec!["name", "price", "quantity"]);
/// ```
pub fn validate_product(input: &NewProduct) -> ValidationResult<ProductDraft> {
    let mut errors = FieldErrors::default();

    let name = errors.check(validate_required("name", &input.name));
    let category = errors.check(validate_required("category", &input.category));
    let price = errors.check(parse_price(&input.price));
    let quantity = errors.check(parse_quantity(&input.quantity));

    errors.finish()?;

    let image = input.image.clone().filter(|bytes| !bytes.is_empty());

    Ok(ProductDraft {
        name,
        category,
        price,
        quantity,
        image,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "Alice").unwrap(), "Alice");
        assert_eq!(validate_required("name", "\tBob\n").unwrap(), "Bob");

        assert_eq!(
            validate_required("name", "").unwrap_err(),
            ValidationError::required("name")
        );
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap(), 9.99);
        assert_eq!(parse_price("0").unwrap(), 0.0);
        assert_eq!(parse_price(" 100 ").unwrap(), 100.0);
        assert!(parse_price("-0").unwrap().is_sign_positive());

        assert!(matches!(
            parse_price("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_price("abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
        assert!(matches!(
            parse_price(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5").unwrap(), 5);
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);

        assert!(matches!(
            parse_quantity("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_quantity("5.0"),
            Err(ValidationError::NotAnInteger { .. })
        ));
        assert!(parse_quantity("five").is_err());
    }

    #[test]
    fn test_validate_employee() {
        let ok = validate_employee(&NewEmployee::new(" Alice ", "a@example.com", "Sales")).unwrap();
        assert_eq!(ok.name, "Alice");

        let err = validate_employee(&NewEmployee::new("", "", "Sales")).unwrap_err();
        assert_eq!(err.fields(), vec!["name", "email"]);
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(
            validate_category(&NewCategory::new("  Tools ")).unwrap().name,
            "Tools"
        );
        assert!(validate_category(&NewCategory::new("")).is_err());
    }

    #[test]
    fn test_validate_product_boundaries() {
        let zero = validate_product(&NewProduct::new("Free", "Misc", "0", "0")).unwrap();
        assert_eq!(zero.price, 0.0);
        assert_eq!(zero.quantity, 0);

        let err = validate_product(&NewProduct::new("Widget", "Tools", "-1", "5")).unwrap_err();
        assert_eq!(err.fields(), vec!["price"]);

        let err = validate_product(&NewProduct::new("Widget", "Tools", "1", "-1")).unwrap_err();
        assert_eq!(err.fields(), vec!["quantity"]);
    }

    #[test]
    fn test_validate_product_image() {
        let with = validate_product(&NewProduct::new("A", "B", "1", "1").with_image(vec![7]))
            .unwrap();
        assert_eq!(with.image, Some(vec![7]));

        let empty = validate_product(&NewProduct::new("A", "B", "1", "1").with_image(vec![]))
            .unwrap();
        assert!(empty.image.is_none());
    }
}
