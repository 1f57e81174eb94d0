//! # Commands Module
//!
//! One function per adapter command. Each takes the store state plus its own
//! arguments and returns the text to print on stdout.
//!
//! ## Command Pattern
//! ```rust,ignore
//! pub async fn list(db: &DbState, format: OutputFormat) -> AppResult<String> {
//!     let employees = db.inner().employees().list().await?;
//!     render_list::<_, EmployeeRow>(&employees, format, "No employees found.")
//! }
//! ```
//!
//! ## Available Commands
//! - [`employee`] - add, list, delete
//! - [`category`] - add, list, names, delete
//! - [`product`] - add, list, search, image, delete
//! - [`stats`] - store file size and row counts
//!
//! `watch` lives in [`crate::refresh`].

pub mod category;
pub mod employee;
pub mod product;
pub mod stats;

use clap::ValueEnum;
use serde::Serialize;
use staffstock_core::RecordId;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::AppResult;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rounded table for people
    #[default]
    Table,
    /// Pretty JSON for scripts
    Json,
}

/// Renders a record list as a table or as JSON.
///
/// `empty` is printed instead of an empty table.
pub(crate) fn render_list<T, D>(items: &[T], format: OutputFormat, empty: &str) -> AppResult<String>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Table => {
            if items.is_empty() {
                return Ok(empty.to_string());
            }

            let rows: Vec<D> = items.iter().map(D::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            Ok(table.to_string())
        }
    }
}

/// Renders the identity of a newly added record.
pub(crate) fn render_added(entity: &str, id: RecordId, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({ "id": id }))?),
        OutputFormat::Table => Ok(format!("Added {} {}", entity, id)),
    }
}

/// Renders the outcome of a delete. Deleting an unknown id is not an error.
pub(crate) fn render_deleted(entity: &str, id: RecordId, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => {
            Ok(serde_json::to_string_pretty(&serde_json::json!({ "deleted": id }))?)
        }
        OutputFormat::Table => Ok(format!("Deleted {} {}", entity, id)),
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use staffstock_db::{Database, DbConfig};
    use tempfile::TempDir;

    use crate::state::DbState;

    /// Opens a fresh store in its own temporary directory.
    pub(crate) async fn temp_state() -> (TempDir, DbState) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(DbConfig::new(dir.path().join("staffstock.db")))
            .await
            .unwrap();
        (dir, DbState::new(db))
    }
}
