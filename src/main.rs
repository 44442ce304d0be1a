//! # Knowledge Point Ingest CLI (`kpoint`)
//!
//! The `kpoint` binary drives the batch ingestion pipeline for exam-prep
//! knowledge point documents.
//!
//! ## Usage
//!
//! ```bash
//! kpoint --config ./config/kpoint.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kpoint init` | Create the SQLite database and run schema migrations |
//! | `kpoint import` | Scan, parse, and upsert knowledge files |
//! | `kpoint stats` | Show file and block counts |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! kpoint init --config ./config/kpoint.toml
//!
//! # Run the batch import
//! kpoint import --config ./config/kpoint.toml
//!
//! # Preview without writing anything
//! kpoint import --dry-run
//!
//! # Reprocess everything regardless of stored fingerprints
//! kpoint import --full
//! ```

mod code;
mod config;
mod db;
mod detect;
mod import;
mod migrate;
mod models;
mod parser;
mod report;
mod scan;
mod stats;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Knowledge Point Ingest — batch ingestion of exam-prep knowledge files
/// into a SQLite store.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/kpoint.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "kpoint",
    about = "Knowledge Point Ingest — batch ingestion of exam-prep knowledge files",
    version,
    long_about = "Knowledge Point Ingest scans a directory of semi-structured knowledge point \
    documents, parses each into its three-stage / multi-module hierarchy, fingerprints content \
    for incremental re-processing, and idempotently upserts the result into SQLite while \
    producing a machine-readable import report."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/kpoint.toml`. The source directory, database
    /// path, and report path are read from this file.
    #[arg(long, global = true, default_value = "./config/kpoint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all required tables
    /// (knowledge_files, knowledge_blocks). This command is idempotent —
    /// running it multiple times is safe.
    Init,

    /// Run the batch import.
    ///
    /// Scans the configured source directory, derives each file's code,
    /// decides skip vs. reprocess from the stored fingerprint, parses the
    /// stage/module structure, and upserts into SQLite. Per-file failures
    /// are recorded in the report, not fatal; the exit code is non-zero
    /// only when the directory or the database is unreachable.
    Import {
        /// Ignore stored fingerprints — reprocess every file.
        #[arg(long)]
        full: bool,

        /// Dry run — scan and parse without writing to the database or the
        /// report file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show database statistics.
    ///
    /// Prints file and block counts, per-stage and per-module breakdowns,
    /// and the last import time.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { full, dry_run } => {
            import::run_import(&cfg, full, dry_run).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
