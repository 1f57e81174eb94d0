//! # State Module
//!
//! What a command needs besides its own arguments.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │   AppConfig::load(--config)  ──►  --db override  ──►  DbState::open     │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐    │
//! │  │   AppConfig                  │   │   DbState                    │    │
//! │  │                              │   │                              │    │
//! │  │  database_path               │   │  Database                    │    │
//! │  │  images_dir                  │   │  (connection options only,   │    │
//! │  │  refresh_interval_secs       │   │   cheap to clone)            │    │
//! │  │  log_filter                  │   │                              │    │
//! │  └──────────────────────────────┘   └──────────────────────────────┘    │
//! │                                                                         │
//! │  Both are read-only once the command starts.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{AppConfig, DEFAULT_LOG_FILTER, DEFAULT_REFRESH_SECS};
pub use db::DbState;
