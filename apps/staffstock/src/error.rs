//! # Adapter Error Type
//!
//! Unified error type for adapter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Staffstock                             │
//! │                                                                         │
//! │  staffstock category add Tools                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<String>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation? ── DbError::Validation ──────── message kept ──┐    │  │
//! │  │         │                                                   │    │  │
//! │  │         ▼                                                   ▼    │  │
//! │  │  Duplicate? ─── DbError::DuplicateName ───── message kept ─ AppError │
//! │  │         │                                                   ▲    │  │
//! │  │         ▼                                                   │    │  │
//! │  │  Storage? ───── DbError::QueryFailed(..) ─── logged, generic ┘    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  main: eprintln!("Error: {}", e.message); exit code 1                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage details go to the log, never to the user: the message shown for
//! a storage failure only says which operation failed.

use serde::Serialize;
use staffstock_db::DbError;

/// Result type for adapter operations.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from adapter commands.
///
/// ## Serialization
/// With `--format json` a failure can be reported as:
/// ```json
/// {
///   "code": "DUPLICATE_NAME",
///   "message": "Category 'Tools' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes for adapter responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A form field is blank or not a valid number
    ValidationError,

    /// Category name already taken
    DuplicateName,

    /// Record does not exist
    NotFound,

    /// The store could not be opened, read or written
    StorageError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// Reading or writing a file outside the store failed
    IoError,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::IoError, message)
    }
}

/// Converts database errors to adapter errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(e) => AppError::new(ErrorCode::ValidationError, e.to_string()),
            e @ DbError::DuplicateName { .. } => {
                AppError::new(ErrorCode::DuplicateName, e.to_string())
            }
            e @ DbError::NotFound { .. } => AppError::new(ErrorCode::NotFound, e.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Store connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Could not open the store")
            }
            DbError::SchemaFailed(e) => {
                tracing::error!("Schema creation failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Could not prepare the store")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Store query failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Store operation failed")
            }
            DbError::Io(e) => {
                tracing::error!("Store file access failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Could not access the store files")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                AppError::new(ErrorCode::StorageError, "Store operation failed")
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::io(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err.message()))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::io(format!("Could not render output: {}", err))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
        };
        f.write_str(code)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use staffstock_core::ValidationError;

    #[test]
    fn test_validation_message_is_kept() {
        let err: AppError = DbError::from(ValidationError::required("name")).into();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_duplicate_name_message_is_kept() {
        let err: AppError = DbError::duplicate_name("Category", "Tools").into();

        assert_eq!(err.code, ErrorCode::DuplicateName);
        assert_eq!(err.message, "Category 'Tools' already exists");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let err: AppError = DbError::QueryFailed("disk I/O error at page 17".into()).into();

        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(!err.message.contains("page 17"));
    }

    #[test]
    fn test_code_serializes_screaming_snake_case() {
        let err = AppError::config("refresh_interval_secs must be greater than 0");
        let json = serde_json::to_string(&err).unwrap();

        assert!(json.contains("\"CONFIG_ERROR\""));
        assert_eq!(err.to_string(), format!("[CONFIG_ERROR] {}", err.message));
    }
}
