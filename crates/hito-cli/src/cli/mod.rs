use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `hitos` binary.
#[derive(Debug, Parser)]
#[command(name = "hitos", version, about = "Hitos - client milestone calendar")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no footers)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Snapshot file (defaults to store.snapshot_path)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Client id (defaults to general.default_client_id)
    #[arg(short, long, global = true)]
    pub client: Option<u64>,

    /// Reference date for status classification, YYYY-MM-DD (defaults to today, UTC)
    #[arg(long, global = true, value_parser = parse_date_flag)]
    pub today: Option<NaiveDate>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            snapshot: self.snapshot.clone(),
            client: self.client,
            today: self.today,
        }
    }
}

fn parse_date_flag(raw: &str) -> Result<NaiveDate, String> {
    hito_core::calendar::parse_date(raw).map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}
