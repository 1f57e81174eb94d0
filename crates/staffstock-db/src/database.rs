//! # Database Handle
//!
//! Store configuration and the explicit handle every repository works through.
//!
//! ## Connection Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Per-Operation Connections                          │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← store file, images dir, busy timeout            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await                                          │
//! │       ├── create parent dir + images dir                               │
//! │       └── init_schema (CREATE TABLE IF NOT EXISTS)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.products().insert(..)                                              │
//! │       │                                                                 │
//! │       ├── open SqliteConnection                                        │
//! │       ├── run ONE statement (atomic on its own)                        │
//! │       └── close                                                        │
//! │                                                                         │
//! │  Nothing stays open between operations: no hidden global connection,   │
//! │  nothing to leak when the adapter exits or crashes.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection, Row, SqliteConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::category::CategoryRepository;
use crate::repository::employee::EmployeeRepository;
use crate::repository::product::ProductRepository;
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/staffstock.db")
///     .images_dir("/path/to/images")
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file. Created if missing.
    pub database_path: PathBuf,

    /// Side-channel directory for externally chosen image files.
    /// Default: `images/` next to the database file
    pub images_dir: PathBuf,

    /// How long a statement waits on a locked file before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to create missing tables on open.
    /// Default: true
    pub init_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let database_path = path.into();
        let images_dir = database_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("images");

        DbConfig {
            database_path,
            images_dir,
            busy_timeout: Duration::from_secs(5),
            init_schema: true,
        }
    }

    /// Sets the images directory.
    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Sets the busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to create missing tables on open.
    pub fn init_schema(mut self, init: bool) -> Self {
        self.init_schema = init;
        self
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// One column as declared in the table, from `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// Shape and contents of one managed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub table: String,
    pub rows: i64,
    pub columns: Vec<ColumnInfo>,
    /// First rows in insertion order, one text cell per column.
    /// NULL prints as `NULL`, blobs as `<N bytes>`.
    pub sample: Vec<Vec<String>>,
}

/// Snapshot of the store file for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub path: PathBuf,
    pub file_size_bytes: u64,
    pub tables: Vec<TableStats>,
}

// =============================================================================
// Database
// =============================================================================

/// Explicit handle to the store.
///
/// Holds connection options, never a live connection. Clone it freely and
/// pass it to whatever needs repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::open(DbConfig::new("./staffstock.db")).await?;
///
/// let id = db.categories().insert(&NewCategory::new("Tools")).await?;
/// let hits = db.products().search("wid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
    config: DbConfig,
}

impl Database {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the parent directory of the database file if needed
    /// 2. Creates the images side-channel directory if needed
    /// 3. Configures SQLite:
    ///    - WAL journal, NORMAL synchronous
    ///    - busy timeout from the config
    /// 4. Creates missing tables (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError)` - Directory, connection or schema failure
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            images_dir = %config.images_dir.display(),
            "Opening store"
        );

        if let Some(parent) = config
            .database_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::create_dir_all(&config.images_dir).await?;

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(config.busy_timeout);

        debug!("Connection options configured");

        let db = Database { options, config };

        if db.config.init_schema {
            db.init_schema().await?;
        }

        Ok(db)
    }

    /// Creates missing tables. Idempotent.
    ///
    /// ## When To Call
    /// - Automatically called by `open()` if `init_schema` is true
    /// - Manually call when it is disabled in config
    pub async fn init_schema(&self) -> DbResult<()> {
        let mut conn = self.connect().await?;
        schema::init_schema(&mut conn).await?;
        self.release(conn).await
    }

    /// Opens a fresh connection for one operation.
    pub(crate) async fn connect(&self) -> DbResult<SqliteConnection> {
        self.options
            .connect()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }

    /// Closes a connection once its operation is done.
    ///
    /// On error paths the connection is simply dropped, which also closes it.
    pub(crate) async fn release(&self, conn: SqliteConnection) -> DbResult<()> {
        conn.close().await?;
        Ok(())
    }

    /// Closes a connection after a statement that has already committed.
    ///
    /// The write stands whatever happens here, so a failed close is logged
    /// and not reported to the caller.
    pub(crate) async fn release_after_write(&self, conn: SqliteConnection) {
        settle_after_write(conn.close().await);
    }

    /// Returns the configuration this handle was opened with.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.config.database_path
    }

    /// Side-channel directory for image files chosen outside the store.
    pub fn images_dir(&self) -> &Path {
        &self.config.images_dir
    }

    /// Returns the employee repository.
    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.clone())
    }

    /// Returns the category repository.
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = db.products().search("cable").await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Checks if the store can execute queries.
    pub async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.connect().await else {
            return false;
        };
        let ok = sqlx::query("SELECT 1").execute(&mut conn).await.is_ok();
        ok && self.release(conn).await.is_ok()
    }

    /// Reports the store file size and, for every managed table, its row
    /// count, column definitions and up to `sample_rows` leading rows.
    pub async fn table_stats(&self, sample_rows: u32) -> DbResult<StoreStats> {
        let mut conn = self.connect().await?;

        let mut tables = Vec::with_capacity(schema::TABLES.len());
        for table in schema::TABLES {
            // Table names come from a fixed list, never from input
            let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&mut conn)
                .await?;
            let columns = table_columns(&mut conn, table).await?;
            let sample = if sample_rows == 0 {
                Vec::new()
            } else {
                sample_table(&mut conn, table, &columns, sample_rows).await?
            };
            tables.push(TableStats {
                table: table.to_string(),
                rows,
                columns,
                sample,
            });
        }

        self.release(conn).await?;

        let file_size_bytes = tokio::fs::metadata(self.path()).await?.len();

        Ok(StoreStats {
            path: self.path().to_path_buf(),
            file_size_bytes,
            tables,
        })
    }
}

fn settle_after_write(closed: Result<(), sqlx::Error>) {
    if let Err(e) = closed {
        warn!(error = %e, "Closing connection after a committed write failed");
    }
}

/// Column definitions of `table`, in declaration order.
async fn table_columns(conn: &mut SqliteConnection, table: &str) -> DbResult<Vec<ColumnInfo>> {
    // (cid, name, type, notnull, dflt_value, pk)
    let rows: Vec<(i64, String, String, i64, Option<String>, i64)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", table))
            .fetch_all(&mut *conn)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(_, name, data_type, not_null, default_value, pk)| ColumnInfo {
            name,
            data_type,
            not_null: not_null != 0,
            default_value,
            primary_key: pk != 0,
        })
        .collect())
}

/// Reads up to `limit` rows of `table` as text, oldest first.
async fn sample_table(
    conn: &mut SqliteConnection,
    table: &str,
    columns: &[ColumnInfo],
    limit: u32,
) -> DbResult<Vec<Vec<String>>> {
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    // Images are too big to print; show their size instead
    let cells: Vec<String> = columns
        .iter()
        .map(|c| {
            let col = format!("\"{}\"", c.name.replace('"', "\"\""));
            format!(
                "CASE typeof({col}) WHEN 'null' THEN 'NULL' \
                 WHEN 'blob' THEN '<' || length({col}) || ' bytes>' \
                 ELSE CAST({col} AS TEXT) END"
            )
        })
        .collect();
    let sql = format!(
        "SELECT {} FROM {} ORDER BY rowid LIMIT ?1",
        cells.join(", "),
        table
    );

    let rows = sqlx::query(&sql)
        .bind(i64::from(limit))
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| row.try_get::<String, _>(i).map_err(DbError::from))
                .collect()
        })
        .collect()
}

// =============================================================================
// Test Support
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================
