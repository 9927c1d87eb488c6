//! Ingest command: load the dump into SQLite

use super::shared::{load_configuration, print_report, read_dump, setup_logging};
use crate::Result;
use crate::app::services::ingestion::{IngestReport, IngestionDriver};
use crate::app::services::record_builder::BuildContext;
use crate::app::services::storage::SqliteStore;
use crate::cli::args::IngestArgs;
use crate::config::IngestConfig;
use std::time::Instant;
use tracing::{debug, info};

/// Run the full ingestion described by `args`
pub fn run_ingest(args: IngestArgs) -> Result<IngestReport> {
    let start_time = Instant::now();

    args.validate()?;
    let config = args.apply(load_configuration(args.config_file.as_deref())?);
    setup_logging(&config.logging.level, args.quiet);
    debug!("Command line arguments: {:?}", args);
    config.validate()?;

    let report = ingest(&config, args.show_progress())?;
    print_report(
        "Ingestion Complete",
        &report,
        start_time.elapsed(),
        args.output_format,
    )?;
    Ok(report)
}

/// Ingest according to a resolved configuration
pub fn ingest(config: &IngestConfig, show_progress: bool) -> Result<IngestReport> {
    let dump = read_dump(&config.input_path)?;

    let store = if config.storage.in_memory {
        info!("Writing to an in-memory database");
        SqliteStore::open_in_memory()?
    } else {
        info!(
            "Writing to database {}",
            config.storage.database_path.display()
        );
        SqliteStore::open(&config.storage.database_path)?
    };

    let mut driver = IngestionDriver::new(store, BuildContext::current())
        .with_tables(&config.tables)
        .with_progress(show_progress);
    driver.run(&dump)
}
