//! In-memory record store

use super::{RecordStore, StoreError, check_constraints, duplicate_key_label, target_table};
use crate::app::models::{Record, SourceTable};
use std::collections::HashSet;

/// Vector-backed store with the same uniqueness and column rules as SQLite
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    keys: HashSet<(SourceTable, i64)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in insertion order, derived fields refreshed
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_for(&self, table: SourceTable) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.source_table() == table)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, record: &Record) -> Result<i64, StoreError> {
        let table = record.source_table();
        check_constraints(record)?;

        // NULL legacy ids never collide, as with a SQL UNIQUE column
        if let Some(id) = record.source_id() {
            if !self.keys.insert((table, id)) {
                return Err(StoreError::duplicate_key(
                    target_table(table),
                    duplicate_key_label(record),
                ));
            }
        }

        self.records.push(record.prepared());
        Ok(self.records.len() as i64)
    }

    fn count(&self, table: SourceTable) -> Result<usize, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.source_table() == table)
            .count())
    }
}
