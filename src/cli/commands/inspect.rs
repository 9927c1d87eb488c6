//! Inspect command: build every record in memory and report
//!
//! Nothing is written. Repeated source ids are still reported as duplicates
//! because the memory store enforces the same constraints as SQLite.

use super::shared::{load_configuration, print_report, read_dump, setup_logging};
use crate::{Error, Result};
use crate::app::services::ingestion::{IngestReport, IngestionDriver};
use crate::app::services::record_builder::BuildContext;
use crate::app::services::storage::MemoryStore;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::IngestConfig;
use std::time::Instant;
use tracing::debug;

pub fn run_inspect(args: InspectArgs) -> Result<IngestReport> {
    let start_time = Instant::now();

    let config = args.apply(load_configuration(args.config_file.as_deref())?);
    setup_logging(&config.logging.level, args.quiet);
    debug!("Command line arguments: {:?}", args);
    config.validate()?;

    let (report, store) = inspect(&config, args.show_progress())?;
    print_report(
        "Inspection Complete (nothing written)",
        &report,
        start_time.elapsed(),
        args.output_format,
    )?;

    if args.show_records {
        match args.output_format {
            OutputFormat::Human => {
                for record in store.records() {
                    println!("{}", record);
                }
            }
            OutputFormat::Json => {
                for record in store.records() {
                    let line = serde_json::to_string(record).map_err(|e| {
                        Error::data_validation(format!("Failed to serialize record: {}", e))
                    })?;
                    println!("{}", line);
                }
            }
        }
    }

    Ok(report)
}

/// Dry run according to a resolved configuration
pub fn inspect(config: &IngestConfig, show_progress: bool) -> Result<(IngestReport, MemoryStore)> {
    let dump = read_dump(&config.input_path)?;

    let mut driver = IngestionDriver::new(MemoryStore::new(), BuildContext::current())
        .with_tables(&config.tables)
        .with_progress(show_progress);
    let report = driver.run(&dump)?;
    Ok((report, driver.into_store()))
}
