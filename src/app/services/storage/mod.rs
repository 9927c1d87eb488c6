//! Record persistence
//!
//! Builders hand finished records to a [`RecordStore`]. Each `create` is an
//! independent unit of work; a failure is classified so the ingestion driver
//! can tell an already-migrated row (a duplicate of the legacy id) from a real
//! persistence problem.
//!
//! ## Architecture
//!
//! - [`memory`] - Vector-backed store used for dry runs and tests
//! - [`sqlite`] - SQLite store realising the new schema
//! - [`constraints`] - Column constraints of the new schema, checked in memory

pub mod constraints;
pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

use crate::app::models::{Record, SourceTable};

// Re-export main types for easy access
pub use constraints::check_constraints;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Why a record could not be persisted
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The legacy id is already stored in the target table
    #[error("duplicate key in '{table}': {key}")]
    DuplicateKey { table: String, key: String },

    /// Any other failure: constraint, type or I/O
    #[error("persistence failure in '{table}': {message}")]
    Persistence { table: String, message: String },
}

impl StoreError {
    pub fn duplicate_key(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            table: table.into(),
            key: key.into(),
        }
    }

    pub fn persistence(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

/// Destination for built records
pub trait RecordStore {
    /// Persist one record and return its new id
    fn create(&mut self, record: &Record) -> Result<i64, StoreError>;

    /// Number of records stored for a source table
    fn count(&self, table: SourceTable) -> Result<usize, StoreError>;
}

/// Name of the table in the new schema that receives records from `table`
pub fn target_table(table: SourceTable) -> &'static str {
    match table {
        SourceTable::EnvironmentalTemperatures => "temperatures",
        SourceTable::Humidities => "humidities",
        SourceTable::Lives => "life_cycles",
        SourceTable::PupaMortalityInBreeders => "pupa_mortalities",
        SourceTable::TrayWaterTemperatures => "water_temperatures",
    }
}

/// Key reported for a duplicate, e.g. `legacy_id=12`
pub fn duplicate_key_label(record: &Record) -> String {
    match record.source_id() {
        Some(id) => format!("legacy_id={}", id),
        None => "legacy_id=NULL".to_string(),
    }
}
