//! Insectario Ingest Library
//!
//! A Rust library for migrating the legacy insectary SQL dump (`bd_insecta.sql`)
//! into typed records stored in a new SQLite schema.
//!
//! This library provides tools for:
//! - Locating the `INSERT INTO` statements of the five legacy tables
//! - Tokenizing value tuples with quote-aware comma splitting
//! - Recovering free-form time strings ("7:30 am", "12:00 md", "15:00")
//! - Resolving strain and species codes to display names
//! - Building typed records from declarative per-table field layouts
//! - Persisting records with duplicate-key detection and per-row isolation

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod dump_parser;
        pub mod ingestion;
        pub mod record_builder;
        pub mod storage;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Record, SourceTable};
pub use app::services::storage::{RecordStore, StoreError};
pub use config::IngestConfig;

/// Result type alias for the ingestion pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dump ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Value tuple shorter than the table layout
    #[error("Row shape error in table '{table}': expected {expected} values, found {found}")]
    RowShape {
        table: String,
        expected: usize,
        found: usize,
    },

    /// Decimal parsing error
    #[error("Decimal parsing error: {message}")]
    DecimalParsing {
        message: String,
        #[source]
        source: rust_decimal::Error,
    },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a row shape error
    pub fn row_shape(table: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::RowShape {
            table: table.into(),
            expected,
            found,
        }
    }

    /// Create a decimal parsing error
    pub fn decimal_parsing(message: impl Into<String>, source: rust_decimal::Error) -> Self {
        Self::DecimalParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(error: rust_decimal::Error) -> Self {
        Self::DecimalParsing {
            message: "Decimal parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<figment::Error> for Error {
    fn from(error: figment::Error) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage(StoreError::persistence("database", error.to_string()))
    }
}
