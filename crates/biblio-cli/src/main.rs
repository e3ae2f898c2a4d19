//! `biblio` — command-line front end for the Biblioteca lending tracker.
//!
//! # Usage
//!
//! ```
//! biblio author add --first-name Julio --last-name Cortázar
//! biblio book add --title Rayuela --genre Novela --author-id 1
//! biblio loan add --book-id 1 --member-id 1 --loan-date 2024-05-01 --return-date 2024-05-15
//! biblio --database ~/biblioteca.db book list --json
//! ```

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use biblio_store_sqlite::SqliteStore;
use clap::Parser;
use commands::Command;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "biblio", version, about = "Track books, authors, members and loans")]
struct Cli {
  /// Path to a TOML config file (default: ./biblio.toml if present).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database file; overrides the config file and environment.
  #[arg(long, value_name = "FILE")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
  let database_path = cli.database.unwrap_or(settings.database_path);

  // The store is opened once here and handed to every command.
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open store at {database_path:?}"))?;

  commands::run(cli.command, &store).await
}
