//! Extract → Build → Persist orchestration
//!
//! The driver walks the enabled tables in their fixed order. Every tuple is an
//! independent unit of work: a build or persist failure is logged with the
//! tuple's source id and raw values, counted, and the loop moves on.

use crate::Result;
use crate::app::models::SourceTable;
use crate::app::services::dump_parser::{StatementExtractor, format_values, parse_values};
use crate::app::services::record_builder::{self, BuildContext, BuildWarning, TableSchema};
use crate::app::services::storage::{RecordStore, StoreError};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use super::stats::{IngestReport, TableStats};

/// Ingestion driver over any record store
///
/// # Example
///
/// ```rust
/// use insectario_ingest::app::services::ingestion::IngestionDriver;
/// use insectario_ingest::app::services::record_builder::BuildContext;
/// use insectario_ingest::app::services::storage::MemoryStore;
///
/// # fn example(dump: &str) -> insectario_ingest::Result<()> {
/// let mut driver = IngestionDriver::new(MemoryStore::new(), BuildContext::current());
/// let report = driver.run(dump)?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IngestionDriver<S: RecordStore> {
    store: S,
    context: BuildContext,
    tables: Vec<SourceTable>,
    show_progress: bool,
}

impl<S: RecordStore> IngestionDriver<S> {
    /// Driver over all five tables, without progress bars
    pub fn new(store: S, context: BuildContext) -> Self {
        Self {
            store,
            context,
            tables: SourceTable::ALL.to_vec(),
            show_progress: false,
        }
    }

    /// Restrict processing to `tables`; the fixed order is kept
    pub fn with_tables(mut self, tables: &[SourceTable]) -> Self {
        self.tables = SourceTable::ALL
            .into_iter()
            .filter(|table| tables.contains(table))
            .collect();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn tables(&self) -> &[SourceTable] {
        &self.tables
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Ingest every enabled table of a loaded dump
    pub fn run(&mut self, dump: &str) -> Result<IngestReport> {
        let extractor = StatementExtractor::new(dump);
        let mut report = IngestReport::new();

        for table in self.tables.clone() {
            let stats = self.ingest_table(&extractor, table)?;
            report.push(stats);
        }

        info!("{}", report.summary());
        Ok(report)
    }

    /// Ingest all tuples of one table
    pub fn ingest_table(
        &mut self,
        extractor: &StatementExtractor<'_>,
        table: SourceTable,
    ) -> Result<TableStats> {
        let schema = TableSchema::for_table(table);
        let scan = extractor.scan(table.table_name())?;
        let mut stats = TableStats::new(table);
        stats.skipped_statements = scan.skipped();

        for statement in &scan.statements {
            if !schema.matches_columns(&statement.columns) {
                stats.schema_drift += 1;
                warn!(
                    "Column list of '{}' at line {} differs from the expected layout; processing positionally (found: {})",
                    table,
                    statement.line,
                    statement.columns.join(", ")
                );
            }
        }

        let tuples: Vec<&str> = scan
            .statements
            .iter()
            .flat_map(|statement| statement.tuples.iter().copied())
            .collect();
        stats.tuples_seen = tuples.len();
        debug!("Processing {} tuples for '{}'", tuples.len(), table);

        let progress = self
            .show_progress
            .then(|| create_progress_bar(tuples.len() as u64, table));

        for (index, raw) in tuples.iter().enumerate() {
            self.ingest_tuple(table, index + 1, raw, &mut stats);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        // The finished bar stays on screen as the per-table summary line
        if let Some(pb) = progress {
            pb.finish_with_message(stats.summary());
        }

        info!("Inserted {} {} records", stats.created, table.record_name());
        if stats.skipped_statements > 0 {
            warn!(
                "{} malformed '{}' statements were skipped; their rows are not counted as tuples",
                stats.skipped_statements, table
            );
        }
        Ok(stats)
    }

    fn ingest_tuple(&mut self, table: SourceTable, index: usize, raw: &str, stats: &mut TableStats) {
        let values = parse_values(raw);
        let source_id = values
            .first()
            .and_then(|value| value.as_str())
            .unwrap_or("NULL")
            .to_string();

        let built = match record_builder::build(table, &values, &self.context) {
            Ok(built) => built,
            Err(e) => {
                let message = format!(
                    "Tuple {} (source id {}): {} | values: {}",
                    index,
                    source_id,
                    e,
                    format_values(&values)
                );
                error!("Failed to build {} record: {}", table.record_name(), message);
                stats.add_build_failure(message);
                return;
            }
        };

        for warning in &built.warnings {
            match warning {
                BuildWarning::TimeFallback { .. } => stats.time_fallbacks += 1,
                _ => stats.degraded_fields += 1,
            }
            debug!(
                "{} tuple {} (source id {}): {}",
                table, index, source_id, warning
            );
        }

        match self.store.create(&built.record) {
            Ok(id) => {
                stats.created += 1;
                debug!("Created {} (id {})", built.record, id);
            }
            Err(StoreError::DuplicateKey { key, .. }) => {
                stats.duplicates += 1;
                warn!(
                    "{} record with source id {} already exists ({}), skipping",
                    table.record_name(),
                    source_id,
                    key
                );
            }
            Err(e) => {
                let message = format!(
                    "Tuple {} (source id {}): {} | values: {}",
                    index,
                    source_id,
                    e,
                    format_values(&values)
                );
                error!("Failed to insert {} record: {}", table.record_name(), message);
                stats.add_persist_failure(message);
            }
        }
    }
}

fn create_progress_bar(total: u64, table: SourceTable) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(table.to_string());
    pb
}
