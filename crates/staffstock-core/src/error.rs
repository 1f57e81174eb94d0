//! # Error Types
//!
//! Domain-specific error types for staffstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  staffstock-core errors (this file)                                    │
//! │  └── ValidationError  - Missing or malformed form fields               │
//! │                                                                         │
//! │  staffstock-db errors (separate crate)                                 │
//! │  └── DbError          - Duplicate name, not found, storage failures    │
//! │                                                                         │
//! │  Adapter errors (in app)                                               │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → AppError → User         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything touches the store, so a rejected record is never
/// partially written. Every variant names the offending field so the caller
/// can show a field-specific message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field does not parse as a finite number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// An integer field does not parse as a whole number.
    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger { field: String, value: String },

    /// A numeric field is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// More than one field failed.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Names of every field this error reports, in form order.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotAnInteger { field, .. }
            | ValidationError::Negative { field } => vec![field.as_str()],
            ValidationError::Multiple(errors) => {
                errors.iter().flat_map(ValidationError::fields).collect()
            }
        }
    }

    /// Folds collected field errors into one error.
    ///
    /// Returns `None` when nothing failed, the error itself when exactly one
    /// field failed, and `Multiple` otherwise.
    pub fn from_errors(mut errors: Vec<ValidationError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NotANumber {
            field: "price".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price must be a number, got 'abc'");
    }

    #[test]
    fn test_multiple_lists_every_field() {
        let err = ValidationError::Multiple(vec![
            ValidationError::required("name"),
            ValidationError::Negative {
                field: "quantity".to_string(),
            },
        ]);

        assert_eq!(err.fields(), vec!["name", "quantity"]);
        assert_eq!(
            err.to_string(),
            "name is required; quantity must not be negative"
        );
    }

    #[test]
    fn test_from_errors() {
        assert!(ValidationError::from_errors(vec![]).is_none());

        let single = ValidationError::from_errors(vec![ValidationError::required("email")]);
        assert_eq!(single, Some(ValidationError::required("email")));

        let many = ValidationError::from_errors(vec![
            ValidationError::required("email"),
            ValidationError::required("department"),
        ]);
        assert!(matches!(many, Some(ValidationError::Multiple(ref v)) if v.len() == 2));
    }
}
