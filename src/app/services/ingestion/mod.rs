//! Dump ingestion pipeline
//!
//! This module drives the whole migration: statement extraction, tuple
//! normalization, record building and persistence, table by table.
//!
//! ## Architecture
//!
//! - [`driver`] - Per-table Extract → Build → Persist loop with per-tuple isolation
//! - [`stats`] - Per-table tallies and the run report
//!
//! Only failures to open inputs stop a run; everything that goes wrong with a
//! single tuple is logged, counted and skipped.

pub mod driver;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use driver::IngestionDriver;
pub use stats::{IngestReport, TableStats};
