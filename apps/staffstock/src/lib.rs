//! # Staffstock Adapter Library
//!
//! Command line front end for the Staffstock store: the forms and lists of
//! the shop window, one command at a time.
//!
//! ## Module Organization
//! ```text
//! staffstock/
//! ├── lib.rs          ◄─── You are here (CLI definition, setup & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Store handle wrapper
//! │   └── config.rs   ◄─── Configuration (toml + env + flags)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output format, rendering helpers
//! │   ├── employee.rs ◄─── employee add/list/delete
//! │   ├── category.rs ◄─── category add/list/names/delete
//! │   ├── product.rs  ◄─── product add/list/search/image/delete
//! │   └── stats.rs    ◄─── store statistics
//! ├── refresh.rs      ◄─── Periodic refresh task, `watch`
//! └── error.rs        ◄─── Error type for commands
//! ```
//!
//! ## Usage
//! ```text
//! staffstock category add Receivers
//! staffstock product add --name "HD Receiver" --category Receivers \
//!     --price 850 --quantity 12 --image ./hd.png
//! staffstock product search receiver
//! staffstock --format json employee list
//! staffstock watch --interval 10
//! ```

pub mod commands;
pub mod error;
pub mod refresh;
pub mod state;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use staffstock_core::{NewEmployee, RecordId};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use commands::product::ProductForm;
use commands::OutputFormat;
use error::AppResult;
use state::{AppConfig, DbState, DEFAULT_LOG_FILTER};

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "staffstock")]
#[command(author, version, about = "Employees, categories and products in one local store", long_about = None)]
pub struct Cli {
    /// Store file (default: STAFFSTOCK_DB_PATH, config file, or the app data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: staffstock.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Employee records
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Product categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Show store size and, per table, row count, columns and sample rows
    Stats {
        /// Rows to show from each table (0 for none)
        #[arg(long, default_value_t = 3)]
        sample: u32,
    },
    /// Reload every list periodically until Ctrl-C
    Watch {
        /// Seconds between refreshes (default: refresh_interval_secs from config)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommands {
    /// Add an employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
    },
    /// List employees
    List,
    /// Delete an employee
    Delete {
        /// Employee ID
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// Add a category (names are unique)
    Add {
        /// Category name
        name: String,
    },
    /// List categories
    List,
    /// Print category names only
    Names,
    /// Delete a category (products keep its name)
    Delete {
        /// Category ID
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        /// Category name, as printed by `category names`
        #[arg(long)]
        category: String,
        /// Non-negative number
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        /// Non-negative whole number
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
        /// Image file to store with the product
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List products
    List,
    /// Search by name, category, price or quantity (case-insensitive)
    Search {
        /// Search text; empty lists everything
        #[arg(default_value = "")]
        query: String,
    },
    /// Write a product's stored image to a file
    Image {
        /// Product ID
        id: RecordId,
        /// Output file (default: images/product-<id>.img next to the store)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a product and its image
    Delete {
        /// Product ID
        id: RecordId,
    },
}

// =============================================================================
// Run
// =============================================================================

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ─── RUST_LOG, else STAFFSTOCK_LOG (stderr)      │
/// │  2. Load Config ─── defaults, staffstock.toml, STAFFSTOCK_*, --db      │
/// │     └─ no RUST_LOG: switch the filter to the configured log_filter     │
/// │  3. Open Store ─── create dirs, CREATE TABLE IF NOT EXISTS             │
/// │  4. Dispatch ─── command output printed to stdout                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let env = |key: &str| std::env::var(key).ok();

    // Installed first so config loading is logged too
    let startup = log_directives(
        env,
        &env("STAFFSTOCK_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    );
    let log_filter = init_tracing(&startup);

    let mut config = AppConfig::load(cli.config.clone())?;
    if let Some(db) = cli.db.clone() {
        config.database_path = Some(db);
    }

    let configured = log_directives(env, &config.log_filter);
    if configured != startup {
        if let Err(e) = log_filter.reload(EnvFilter::new(&configured)) {
            warn!(error = %e, "Could not apply configured log filter");
        }
    }
    debug!(?config, "Configuration loaded");

    let db = DbState::open(&config).await?;

    let output = dispatch(&db, &config, cli.format, cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

/// Routes a parsed command to its handler and returns what to print.
pub async fn dispatch(
    db: &DbState,
    config: &AppConfig,
    format: OutputFormat,
    command: Commands,
) -> AppResult<String> {
    match command {
        Commands::Employee { command } => match command {
            EmployeeCommands::Add {
                name,
                email,
                department,
            } => {
                commands::employee::add(db, NewEmployee::new(name, email, department), format)
                    .await
            }
            EmployeeCommands::List => commands::employee::list(db, format).await,
            EmployeeCommands::Delete { id } => commands::employee::delete(db, id, format).await,
        },
        Commands::Category { command } => match command {
            CategoryCommands::Add { name } => commands::category::add(db, name, format).await,
            CategoryCommands::List => commands::category::list(db, format).await,
            CategoryCommands::Names => commands::category::names(db, format).await,
            CategoryCommands::Delete { id } => commands::category::delete(db, id, format).await,
        },
        Commands::Product { command } => match command {
            ProductCommands::Add {
                name,
                category,
                price,
                quantity,
                image,
            } => {
                let form = ProductForm {
                    name,
                    category,
                    price,
                    quantity,
                    image,
                };
                commands::product::add(db, form, format).await
            }
            ProductCommands::List => commands::product::list(db, format).await,
            ProductCommands::Search { query } => {
                commands::product::search(db, &query, format).await
            }
            ProductCommands::Image { id, out } => {
                commands::product::image(db, id, out, format).await
            }
            ProductCommands::Delete { id } => commands::product::delete(db, id, format).await,
        },
        Commands::Stats { sample } => commands::stats::show(db, sample, format).await,
        Commands::Watch { interval } => {
            let period = match interval {
                Some(0) => {
                    return Err(error::AppError::config("--interval must be greater than 0"))
                }
                Some(secs) => Duration::from_secs(secs),
                None => config.refresh_interval(),
            };
            info!(period_secs = period.as_secs(), "Watching store");
            refresh::watch(db, period, format).await
        }
    }
}

/// Filter directives to log with: `RUST_LOG` if set, else `configured`.
fn log_directives(lookup: impl Fn(&str) -> Option<String>, configured: &str) -> String {
    lookup("RUST_LOG").unwrap_or_else(|| configured.to_string())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=staffstock_db=trace` - Trace the storage layer only
/// - Default: the configured filter (`info,staffstock=debug,sqlx=warn`)
///
/// Logs go to stderr; stdout carries command output only. The returned
/// handle swaps the filter once the config file has been read.
fn init_tracing(directives: &str) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::temp_state;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("staffstock").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["product", "list", "--format", "json", "--db", "/tmp/s.db"]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/s.db")));
        assert!(matches!(
            cli.command,
            Commands::Product {
                command: ProductCommands::List
            }
        ));
    }

    #[test]
    fn test_negative_price_reaches_validation() {
        let cli = parse(&[
            "product", "add", "--name", "W", "--category", "T", "--price", "-1", "--quantity", "1",
        ]);

        match cli.command {
            Commands::Product {
                command: ProductCommands::Add { price, .. },
            } => assert_eq!(price, "-1"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rust_log_wins_over_configured_filter() {
        let rust_log = |key: &str| (key == "RUST_LOG").then(|| "trace".to_string());
        let unset = |_: &str| None;

        assert_eq!(log_directives(rust_log, "warn"), "trace");
        assert_eq!(log_directives(unset, "warn"), "warn");
        assert_eq!(log_directives(unset, DEFAULT_LOG_FILTER), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_stats_sample_defaults_to_three() {
        assert!(matches!(parse(&["stats"]).command, Commands::Stats { sample: 3 }));
        assert!(matches!(
            parse(&["stats", "--sample", "0"]).command,
            Commands::Stats { sample: 0 }
        ));
    }

    #[test]
    fn test_search_query_defaults_to_empty() {
        let cli = parse(&["product", "search"]);

        assert!(matches!(
            cli.command,
            Commands::Product {
                command: ProductCommands::Search { ref query }
            } if query.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_dispatch_add_and_search() {
        let (_dir, db) = temp_state().await;
        let config = AppConfig::default();

        dispatch(&db, &config, OutputFormat::Table, parse(&["category", "add", "Tools"]).command)
            .await
            .unwrap();
        dispatch(
            &db,
            &config,
            OutputFormat::Table,
            parse(&[
                "product", "add", "--name", "Widget", "--category", "Tools", "--price", "9.99",
                "--quantity", "5",
            ])
            .command,
        )
        .await
        .unwrap();

        let out = dispatch(
            &db,
            &config,
            OutputFormat::Table,
            parse(&["product", "search", "WID"]).command,
        )
        .await
        .unwrap();
        assert!(out.contains("Widget"));
        assert!(out.contains("9.99"));
    }

    #[tokio::test]
    async fn test_watch_rejects_zero_interval() {
        let (_dir, db) = temp_state().await;

        let err = dispatch(
            &db,
            &AppConfig::default(),
            OutputFormat::Table,
            parse(&["watch", "--interval", "0"]).command,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }
}
