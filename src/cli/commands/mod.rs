//! Command implementations for the insectario-ingest CLI
//!
//! Each command lives in its own module:
//! - `ingest`: full run into a SQLite database
//! - `inspect`: dry run into the in-memory store
//!
//! Both return the [`IngestReport`] so the binary can decide its exit code.

pub mod ingest;
pub mod inspect;
pub mod shared;

use crate::app::services::ingestion::IngestReport;
use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the selected subcommand
pub fn run(args: Args) -> Result<IngestReport> {
    match args.command {
        Some(Commands::Ingest(ingest_args)) => ingest::run_ingest(ingest_args),
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args),
        None => Err(Error::configuration("No command given")),
    }
}
