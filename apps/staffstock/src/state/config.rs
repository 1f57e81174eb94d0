//! # Adapter Configuration
//!
//! Where the store lives, how often `watch` refreshes, and what gets logged.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                               │
//! │  2. Config file                                                        │
//! │     --config PATH, or                                                  │
//! │     ~/.config/staffstock/staffstock.toml (Linux)                       │
//! │     ~/Library/Application Support/com.staffstock.staffstock/... (macOS)│
//! │  3. Environment variables (STAFFSTOCK_*)                               │
//! │  4. Command line flags (--db)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! # staffstock.toml
//! database_path = "/srv/shop/employees.db"
//! images_dir = "/srv/shop/images"
//! refresh_interval_secs = 30
//! log_filter = "info,staffstock=debug,sqlx=warn"
//! ```
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use staffstock_db::DbConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// File name of the store inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "staffstock.db";

/// File name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "staffstock.toml";

/// Default refresh period of `watch`, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Default log filter when neither `RUST_LOG` nor `STAFFSTOCK_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,staffstock=debug,sqlx=warn";

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite store file.
    /// Default: `staffstock.db` in the platform data directory
    pub database_path: Option<PathBuf>,

    /// Side-channel directory for image files.
    /// Default: `images/` next to the store file
    pub images_dir: Option<PathBuf>,

    /// Period of the `watch` refresh, in seconds. Must be greater than 0.
    pub refresh_interval_secs: u64,

    /// tracing-subscriber filter directives. `RUST_LOG` wins over this.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            images_dir: None,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicitly given `config_path` must exist; a missing file at the
    /// default location just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        // Override with environment variables
        config.apply_env_overrides();

        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(path = %path.display(), "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.refresh_interval_secs == 0 {
            return Err(AppError::config(
                "refresh_interval_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Applies `STAFFSTOCK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STAFFSTOCK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("STAFFSTOCK_IMAGES_DIR") {
            self.images_dir = Some(PathBuf::from(dir));
        }

        if let Some(secs) = lookup("STAFFSTOCK_REFRESH_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.refresh_interval_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric STAFFSTOCK_REFRESH_SECS"),
            }
        }

        if let Some(filter) = lookup("STAFFSTOCK_LOG") {
            self.log_filter = filter;
        }
    }

    /// Returns the store file path, falling back to the platform data directory.
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| {
                AppError::config("Could not determine app data directory; pass --db")
            })
    }

    /// Builds the store configuration.
    pub fn db_config(&self) -> AppResult<DbConfig> {
        let config = DbConfig::new(self.resolve_database_path()?);

        Ok(match &self.images_dir {
            Some(dir) => config.images_dir(dir),
            None => config,
        })
    }

    /// Refresh period of `watch`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "staffstock", "staffstock")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
