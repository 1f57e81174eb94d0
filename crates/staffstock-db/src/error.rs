//! # Database Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (core)      SQLite Error (sqlx::Error)                │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├── expected: Validation, DuplicateName, NotFound                │
//! │       └── storage:  ConnectionFailed, SchemaFailed, QueryFailed, ...   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in adapter) ← code + user-facing message                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage errors are never retried here; they surface to the caller.

use staffstock_core::ValidationError;
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Form input was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A record with the same unique name already exists.
    ///
    /// ## When This Occurs
    /// - Adding a category whose name is taken
    #[error("{entity} '{name}' already exists")]
    DuplicateName { entity: String, name: String },

    /// The targeted record does not exist and existence was required.
    ///
    /// ## When This Occurs
    /// - Fetching the image of a product id that was never assigned or was
    ///   deleted. Deletes never raise this.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store file could not be opened.
    ///
    /// ## When This Occurs
    /// - Parent directory missing and not creatable
    /// - File permissions issue
    /// - Medium unavailable
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Creating the tables failed.
    #[error("Schema initialization failed: {0}")]
    SchemaFailed(String),

    /// Statement execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Filesystem error outside SQLite (directories, file metadata).
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a DuplicateName error.
    pub fn duplicate_name(entity: impl Into<String>, name: impl Into<String>) -> Self {
        DbError::DuplicateName {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// True for failures of the underlying medium rather than of the input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_)
                | DbError::SchemaFailed(_)
                | DbError::QueryFailed(_)
                | DbError::Io(_)
                | DbError::Internal(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (UNIQUE)  → DbError::DuplicateName (name filled by caller)
/// sqlx::Error::Database (other)   → DbError::QueryFailed
/// sqlx::Error::Io                 → DbError::ConnectionFailed
/// Other                           → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    // "UNIQUE constraint failed: <table>.<column>"
                    let target = db_err
                        .message()
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::DuplicateName {
                        entity: target,
                        name: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(db_err.message().to_string())
                }
            }

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::Io(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
