//! Command line argument parsing and validation
//!
//! This module defines the CLI structure using clap derive macros for type-safe
//! argument parsing. Flags given here override every configuration layer.

use crate::app::models::SourceTable;
use crate::config::IngestConfig;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Legacy insectary dump ingestion tool
#[derive(Debug, Clone, Parser)]
#[command(
    name = "insectario-ingest",
    version,
    about = "Ingest a legacy insectary SQL dump into typed records",
    long_about = "Reads the INSERT statements of a legacy insectary database dump, converts \
                  every row into a typed record of the new schema and stores it in SQLite. \
                  Rows that fail are logged with their values and counted; the run continues."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Ingest the dump into a SQLite database
    Ingest(IngestArgs),

    /// Dry run: build every record in memory and report without writing
    Inspect(InspectArgs),
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Default, Parser)]
pub struct IngestArgs {
    /// Legacy SQL dump to read
    ///
    /// Defaults to `bd_insecta.sql` in the working directory unless configured.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Path to the legacy SQL dump"
    )]
    pub input_path: Option<PathBuf>,

    /// SQLite database to write
    #[arg(
        long = "database",
        value_name = "PATH",
        help = "SQLite database file for the ingested records"
    )]
    pub database_path: Option<PathBuf>,

    /// Write into an in-memory database that is discarded at exit
    #[arg(
        long = "in-memory",
        help = "Use an in-memory database instead of a file",
        conflicts_with = "database_path"
    )]
    pub in_memory: bool,

    /// Tables to ingest (comma-separated list)
    ///
    /// Available tables: environmental_temperatures, humidities, lives,
    /// pupa_mortality_in_breeders, tray_water_temperatures
    #[arg(
        short = 't',
        long = "tables",
        value_name = "LIST",
        help = "Comma-separated list of legacy tables to ingest"
    )]
    pub tables: Option<TableList>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ./insectario-ingest.toml and ~/.config/insectario-ingest/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and the final report
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the final report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Default, Parser)]
pub struct InspectArgs {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Path to the legacy SQL dump"
    )]
    pub input_path: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "tables",
        value_name = "LIST",
        help = "Comma-separated list of legacy tables to inspect"
    )]
    pub tables: Option<TableList>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Print every built record after the report
    #[arg(long = "show-records", help = "Print the records that would be created")]
    pub show_records: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated table lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableList {
    pub tables: Vec<SourceTable>,
}

impl FromStr for TableList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tables = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(SourceTable::from_str)
            .collect::<Result<Vec<_>>>()?;

        if tables.is_empty() {
            return Err(Error::configuration("Table list cannot be empty"));
        }

        Ok(TableList { tables })
    }
}

/// Map `-q` / `-v` to a tracing level
fn log_level(quiet: bool, verbose: u8, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

impl IngestArgs {
    /// Validate the ingest arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(Error::configuration("Database path cannot be empty"));
            }
            if path.is_dir() {
                return Err(Error::configuration(format!(
                    "Database path is a directory: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Get the log level, falling back to the configured one
    pub fn get_log_level(&self, configured: &str) -> String {
        log_level(self.quiet, self.verbose, configured)
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, mut config: IngestConfig) -> IngestConfig {
        if let Some(path) = &self.input_path {
            config = config.with_input_path(path.clone());
        }
        if let Some(path) = &self.database_path {
            config = config.with_database_path(path.clone());
        }
        if self.in_memory {
            config = config.with_in_memory();
        }
        if let Some(list) = &self.tables {
            config = config.with_tables(list.tables.clone());
        }
        let level = self.get_log_level(&config.logging.level);
        config.with_log_level(level)
    }
}

impl InspectArgs {
    pub fn get_log_level(&self, configured: &str) -> String {
        log_level(self.quiet, self.verbose, configured)
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Apply command line overrides; inspect never touches the database
    pub fn apply(&self, mut config: IngestConfig) -> IngestConfig {
        if let Some(path) = &self.input_path {
            config = config.with_input_path(path.clone());
        }
        if let Some(list) = &self.tables {
            config = config.with_tables(list.tables.clone());
        }
        let level = self.get_log_level(&config.logging.level);
        config.with_in_memory().with_log_level(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_table_list_parsing() {
        let result = TableList::from_str("lives").unwrap();
        assert_eq!(result.tables, vec![SourceTable::Lives]);

        let result = TableList::from_str(" humidities , tray_water_temperatures ").unwrap();
        assert_eq!(
            result.tables,
            vec![SourceTable::Humidities, SourceTable::TrayWaterTemperatures]
        );

        assert!(TableList::from_str("users").is_err());
        assert!(TableList::from_str("").is_err());
        assert!(TableList::from_str(",,,").is_err());
    }

    #[test]
    fn test_parse_ingest_command() {
        let args = Args::try_parse_from([
            "insectario-ingest",
            "ingest",
            "--input",
            "dump.sql",
            "--database",
            "out.db",
            "--tables",
            "lives,humidities",
            "-vv",
            "--output-format",
            "json",
        ])
        .unwrap();

        let Some(Commands::Ingest(ingest)) = args.command else {
            panic!("expected ingest command");
        };
        assert_eq!(ingest.input_path, Some(PathBuf::from("dump.sql")));
        assert_eq!(ingest.database_path, Some(PathBuf::from("out.db")));
        assert_eq!(ingest.verbose, 2);
        assert_eq!(ingest.output_format, OutputFormat::Json);
        assert_eq!(
            ingest.tables.map(|list| list.tables),
            Some(vec![SourceTable::Lives, SourceTable::Humidities])
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["insectario-ingest", "ingest", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_in_memory_conflicts_with_database() {
        let result = Args::try_parse_from([
            "insectario-ingest",
            "ingest",
            "--in-memory",
            "--database",
            "out.db",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let args = Args::try_parse_from(["insectario-ingest"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_log_levels() {
        let mut args = IngestArgs::default();
        assert_eq!(args.get_log_level("warn"), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level("warn"), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level("warn"), "debug");
        args.verbose = 5;
        assert_eq!(args.get_log_level("warn"), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level("warn"), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_apply_overrides_config() {
        let args = IngestArgs {
            input_path: Some(PathBuf::from("other.sql")),
            in_memory: true,
            tables: Some(TableList {
                tables: vec![SourceTable::Lives],
            }),
            verbose: 1,
            ..Default::default()
        };

        let config = args.apply(IngestConfig::default());
        assert_eq!(config.input_path, PathBuf::from("other.sql"));
        assert!(config.storage.in_memory);
        assert_eq!(config.tables, vec![SourceTable::Lives]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_inspect_apply_forces_in_memory() {
        let config = InspectArgs::default().apply(IngestConfig::default());
        assert!(config.storage.in_memory);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_ingest_args_validation() {
        let temp_dir = TempDir::new().unwrap();

        let args = IngestArgs {
            database_path: Some(temp_dir.path().join("out.db")),
            ..Default::default()
        };
        assert!(args.validate().is_ok());

        let args = IngestArgs {
            database_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(args.validate().is_err());
    }
}
