//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, dump reading and report rendering
//! used by both `ingest` and `inspect`.

use crate::app::services::ingestion::{IngestReport, TableStats};
use crate::cli::args::OutputFormat;
use crate::config::IngestConfig;
use crate::{Error, Result};
use colored::*;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins over `level`. A second call in the same process is a no-op.
pub fn setup_logging(level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("insectario_ingest={}", level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!("Logging initialized at level: {}", level);
    }
}

/// Load and validate the layered configuration
pub fn load_configuration(config_file: Option<&Path>) -> Result<IngestConfig> {
    let config = IngestConfig::load(config_file)?;
    debug!("Configuration before CLI overrides: {:?}", config);
    Ok(config)
}

/// Read the whole dump into memory
///
/// A missing dump is the one fatal input error; nothing is processed.
pub fn read_dump(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let dump = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read dump {}", path.display()), e))?;
    info!("Loaded dump {} ({} bytes)", path.display(), dump.len());
    Ok(dump)
}

/// Print the final report in the requested format
pub fn print_report(
    title: &str,
    report: &IngestReport,
    elapsed: Duration,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print_human_report(title, report, elapsed);
            Ok(())
        }
        OutputFormat::Json => print_json_report(report, elapsed),
    }
}

fn print_human_report(title: &str, report: &IngestReport, elapsed: Duration) {
    println!("\n{}", title.bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for stats in &report.tables {
        print_table_line(stats);
    }

    println!();
    println!(
        "   Tuples: {}  Created: {}  Duplicates: {}  Failed: {}",
        report.tuples_seen().to_string().bright_white().bold(),
        report.created().to_string().bright_green().bold(),
        report.duplicates().to_string().yellow(),
        failures_text(report.failures()),
    );
    if report.skipped_statements() > 0 {
        println!(
            "   Malformed statements skipped: {}",
            report.skipped_statements().to_string().bright_red().bold()
        );
    }
    if report.time_fallbacks() > 0 {
        println!(
            "   Times defaulted to 00:00: {}",
            report.time_fallbacks().to_string().yellow()
        );
    }
    println!("   Processing time: {:.2}s", elapsed.as_secs_f64());
    println!();
}

fn print_table_line(stats: &TableStats) {
    println!(
        "   • {:<28} {:>6} tuples, {:>6} created, {:>4} duplicates, {} failed",
        stats.table.table_name(),
        stats.tuples_seen,
        stats.created,
        stats.duplicates,
        failures_text(stats.failures()),
    );
    if stats.schema_drift > 0 {
        println!(
            "     {} column list differs from the expected layout in {} statement(s)",
            "⚠".yellow(),
            stats.schema_drift
        );
    }
    if stats.skipped_statements > 0 {
        println!(
            "     {} {} malformed statement(s) skipped, their rows were not read",
            "✗".bright_red(),
            stats.skipped_statements
        );
    }
}

fn failures_text(failures: usize) -> ColoredString {
    if failures == 0 {
        "0".normal()
    } else {
        failures.to_string().bright_red().bold()
    }
}

fn print_json_report(report: &IngestReport, elapsed: Duration) -> Result<()> {
    let json = serde_json::json!({
        "tables": report.tables,
        "tuples_seen": report.tuples_seen(),
        "created": report.created(),
        "duplicates": report.duplicates(),
        "failures": report.failures(),
        "time_fallbacks": report.time_fallbacks(),
        "skipped_statements": report.skipped_statements(),
        "processing_time_seconds": elapsed.as_secs_f64(),
    });

    let text = serde_json::to_string_pretty(&json)
        .map_err(|e| Error::data_validation(format!("Failed to serialize report: {}", e)))?;
    println!("{}", text);
    Ok(())
}
