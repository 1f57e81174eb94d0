//! # Staffstock Entry Point
//!
//! ## Startup Sequence
//! 1. Parse the command line
//! 2. Initialize tracing (logging to stderr)
//! 3. Load configuration (file, environment, flags), then apply its log filter
//! 4. Open the store, creating tables if missing
//! 5. Run one command and print its output to stdout
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use staffstock::commands::OutputFormat;
use staffstock::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match staffstock::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match format {
                OutputFormat::Json => match serde_json::to_string(&e) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("Error: {}", e.message),
                },
                OutputFormat::Table => eprintln!("Error: {}", e.message),
            }
            ExitCode::FAILURE
        }
    }
}
