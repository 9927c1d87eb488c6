//! Typed record building for legacy dump rows
//!
//! This module turns the normalized values of one tuple into one of the typed
//! records in [`crate::app::models`].
//!
//! ## Architecture
//!
//! - [`schema`] - Ordered field layouts (name, kind, default) of the five legacy tables
//! - [`field_parsers`] - Generic resolver applying a layout to a value list
//! - [`builder`] - Thin typed constructors plus the per-run build context
//! - [`time_recovery`] - Free-form time-of-day parsing with a midnight fallback
//! - [`lookup`] - Strain and species code resolution
//!
//! Builders are pure: the only outside input is the timestamp carried by
//! [`BuildContext`].

pub mod builder;
pub mod field_parsers;
pub mod lookup;
pub mod schema;
pub mod time_recovery;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::{BuildContext, BuiltRecord, build};
pub use field_parsers::{BuildWarning, FieldValue, ResolvedRow};
pub use lookup::{LookupKind, resolve};
pub use schema::{FieldDefault, FieldKind, FieldSpec, TableSchema};
pub use time_recovery::{recover, recover_strict};
