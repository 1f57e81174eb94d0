//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn search(db: &DbState, query: &str, format: OutputFormat) -> AppResult<String> {
//!     let products = db.inner().products().search(query).await?;
//!     render_list::<_, ProductRow>(&products, format, "No products found.")
//! }
//! ```

use staffstock_db::Database;
use tracing::info;

use super::AppConfig;
use crate::error::AppResult;

/// Wrapper around `Database` for the adapter.
///
/// The handle holds connection options only, so every command runs its
/// statements on fresh connections and nothing is left open on exit.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the store handle.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens the store described by the configuration.
    pub async fn open(config: &AppConfig) -> AppResult<Self> {
        let db = Database::open(config.db_config()?).await?;

        info!(path = %db.path().display(), "Store ready");
        Ok(DbState::new(db))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
