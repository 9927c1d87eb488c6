//! Ingestion statistics and the final run report
//!
//! This module provides per-table tallies of what happened to every tuple and
//! the report returned to the CLI for human or JSON output.

use crate::app::models::SourceTable;
use serde::Serialize;

/// Outcome counts for one legacy table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub table: SourceTable,
    /// Value tuples found in the dump
    pub tuples_seen: usize,
    /// Records persisted
    pub created: usize,
    /// Records skipped because the legacy id was already stored
    pub duplicates: usize,
    /// Tuples that could not be turned into a record
    pub build_failures: usize,
    /// Records the store rejected for any reason other than a duplicate
    pub persist_failures: usize,
    /// Times that fell back to midnight
    pub time_fallbacks: usize,
    /// Other silent degradations (unknown codes, unreadable flags)
    pub degraded_fields: usize,
    /// Statements whose column list differed from the expected layout
    pub schema_drift: usize,
    /// Malformed statements whose rows could not be read at all
    pub skipped_statements: usize,
    /// Error messages for debugging
    pub errors: Vec<String>,
}

impl TableStats {
    pub fn new(table: SourceTable) -> Self {
        Self {
            table,
            tuples_seen: 0,
            created: 0,
            duplicates: 0,
            build_failures: 0,
            persist_failures: 0,
            time_fallbacks: 0,
            degraded_fields: 0,
            schema_drift: 0,
            skipped_statements: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_build_failure(&mut self, message: String) {
        self.build_failures += 1;
        self.errors.push(message);
    }

    pub fn add_persist_failure(&mut self, message: String) {
        self.persist_failures += 1;
        self.errors.push(message);
    }

    /// Build and persist failures; duplicates are not failures
    pub fn failures(&self) -> usize {
        self.build_failures + self.persist_failures
    }

    /// Share of tuples that ended up stored or already present
    pub fn success_rate(&self) -> f64 {
        if self.tuples_seen == 0 {
            100.0
        } else {
            ((self.created + self.duplicates) as f64 / self.tuples_seen as f64) * 100.0
        }
    }

    /// No failed tuples and no statement lost to malformed text
    pub fn is_successful(&self) -> bool {
        self.failures() == 0 && self.skipped_statements == 0
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}: {} tuples -> {} created, {} duplicates, {} failed ({} build, {} persist)",
            self.table,
            self.tuples_seen,
            self.created,
            self.duplicates,
            self.failures(),
            self.build_failures,
            self.persist_failures
        );
        if self.skipped_statements > 0 {
            summary.push_str(&format!(
                ", {} malformed statements skipped",
                self.skipped_statements
            ));
        }
        summary
    }
}

/// Result of one ingestion run across all enabled tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Per-table stats in processing order
    pub tables: Vec<TableStats>,
}

impl IngestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stats: TableStats) {
        self.tables.push(stats);
    }

    pub fn table(&self, table: SourceTable) -> Option<&TableStats> {
        self.tables.iter().find(|stats| stats.table == table)
    }

    pub fn tuples_seen(&self) -> usize {
        self.tables.iter().map(|t| t.tuples_seen).sum()
    }

    pub fn created(&self) -> usize {
        self.tables.iter().map(|t| t.created).sum()
    }

    pub fn duplicates(&self) -> usize {
        self.tables.iter().map(|t| t.duplicates).sum()
    }

    pub fn failures(&self) -> usize {
        self.tables.iter().map(TableStats::failures).sum()
    }

    pub fn time_fallbacks(&self) -> usize {
        self.tables.iter().map(|t| t.time_fallbacks).sum()
    }

    pub fn skipped_statements(&self) -> usize {
        self.tables.iter().map(|t| t.skipped_statements).sum()
    }

    pub fn is_successful(&self) -> bool {
        self.tables.iter().all(TableStats::is_successful)
    }

    pub fn summary(&self) -> String {
        format!(
            "Ingestion Summary: {} tuples across {} tables -> {} created, {} duplicates, {} failed, {} statements skipped",
            self.tuples_seen(),
            self.tables.len(),
            self.created(),
            self.duplicates(),
            self.failures(),
            self.skipped_statements()
        )
    }
}
