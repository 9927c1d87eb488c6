//! Legacy SQL dump parsing
//!
//! This module turns the raw text of the legacy dump into ordered value lists.
//! It understands only the fixed `INSERT INTO <table> (<columns>) VALUES (...), (...);`
//! shape written by the dump generator; no other SQL is interpreted.
//!
//! ## Architecture
//!
//! - [`extractor`] - Locates the insert statements of one table and yields their value groups
//! - [`tokenizer`] - Splits a value group on commas outside single quotes
//! - [`normalizer`] - Maps raw tokens to NULL, quoted text or bare literals
//!
//! ## Usage
//!
//! ```rust
//! use insectario_ingest::app::services::dump_parser::{parse_values, StatementExtractor};
//!
//! # fn example() -> insectario_ingest::Result<()> {
//! let dump = "INSERT INTO `lives` (`id`, `specie_id`) VALUES (1, 3), (2, NULL);";
//! let extractor = StatementExtractor::new(dump);
//!
//! for tuple in extractor.tuples("lives")? {
//!     let values = parse_values(tuple);
//!     println!("{} values", values.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod normalizer;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use extractor::{InsertStatement, StatementExtractor, StatementScan};
pub use normalizer::{SqlValue, format_values, normalize_token, parse_values};
pub use tokenizer::split_tuple;
