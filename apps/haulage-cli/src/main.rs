//! # haulage
//!
//! Command-line front end for Haulage.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Load configuration: defaults → haulage.toml → HAULAGE_* env        │
//! │     → --db flag                                                         │
//! │  3. Initialize logging (RUST_LOG, else [log] level), on stderr         │
//! │  4. Run the subcommand; errors print to stderr, exit code 1            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::cli::Cli;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.db {
        config.database.path = path.clone();
    }

    logging::init(&config.log.level);
    debug!(db = %config.database.path.display(), capacity = %config.truck_capacity(), "Configuration loaded");

    commands::execute(cli, config).await
}
