//! Application constants for insectario ingest
//!
//! This module contains file defaults, legacy table names, lookup tables,
//! time formats and storage limits used throughout the ingestion pipeline.

// =============================================================================
// Files and Configuration
// =============================================================================

/// Dump file read when no input path is configured
pub const DEFAULT_DUMP_FILE: &str = "bd_insecta.sql";

/// SQLite database written when no database path is configured
pub const DEFAULT_DATABASE_FILE: &str = "insectario.db";

/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "insectario-ingest";

/// Project-local configuration file in the working directory
pub const LOCAL_CONFIG_FILE: &str = "insectario-ingest.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "INSECTARIO_";

/// Default log level when neither `-v` nor config sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Legacy Table Names
// =============================================================================

/// Table names as they appear in the legacy dump
pub mod tables {
    pub const ENVIRONMENTAL_TEMPERATURES: &str = "environmental_temperatures";
    pub const HUMIDITIES: &str = "humidities";
    pub const LIVES: &str = "lives";
    pub const PUPA_MORTALITY_IN_BREEDERS: &str = "pupa_mortality_in_breeders";
    pub const TRAY_WATER_TEMPERATURES: &str = "tray_water_temperatures";

    /// All tables in processing order
    pub const ALL: &[&str] = &[
        ENVIRONMENTAL_TEMPERATURES,
        HUMIDITIES,
        LIVES,
        PUPA_MORTALITY_IN_BREEDERS,
        TRAY_WATER_TEMPERATURES,
    ];
}

// =============================================================================
// Lookup Tables
// =============================================================================

/// Closed code → name enumerations used by the legacy application
pub mod lookups {
    /// Strain codes (legacy `strain_id`, `breeder_code`)
    pub const STRAINS: &[(i64, &str)] = &[
        (1, "Agua Clara"),
        (2, "Bajo Chiquito"),
        (3, "Yaviza"),
        (4, "Quebrada Peña"),
        (5, "Marragantí"),
        (6, "Rockefeller"),
        (7, "24 de Diciembre"),
        (8, "New Orleans"),
    ];

    /// Species codes (legacy `specie_id`)
    pub const SPECIES: &[(i64, &str)] = &[(1, "Anopheles albimanus"), (3, "Aedes aegypti")];

    /// Placeholder prefix for an unmapped strain code
    pub const STRAIN_PLACEHOLDER: &str = "Cepa";

    /// Placeholder prefix for an unmapped species code
    pub const SPECIES_PLACEHOLDER: &str = "Especie";
}

// =============================================================================
// Date and Time Formats
// =============================================================================

pub mod formats {
    /// Legacy date columns
    pub const DATE: &str = "%Y-%m-%d";

    /// Legacy `created_at` / `updated_at` columns
    pub const DATETIME: &str = "%Y-%m-%d %H:%M:%S";

    /// Spanish "mediodía" marker used in place of "pm" for noon readings
    pub const MIDDAY_MARKER: &str = "md";

    /// Formats tried after a midday marker is rewritten to "pm"
    pub const MIDDAY_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p"];

    /// Ordered fallback formats for free-form time strings
    pub const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];
}

// =============================================================================
// Field Coercion
// =============================================================================

/// Text values accepted for the legacy `divided_trays` column
pub mod divided_trays {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}

/// Decimal layouts of the target schema (total digits, decimal places)
pub mod decimals {
    pub const ENVIRONMENTAL_PRECISION: u32 = 5;
    pub const ENVIRONMENTAL_SCALE: u32 = 1;
    pub const WATER_PRECISION: u32 = 5;
    pub const WATER_SCALE: u32 = 2;
}

// =============================================================================
// Storage Limits
// =============================================================================

/// Maximum text lengths (in characters) of the target schema
pub mod limits {
    pub const WORK_AREA_MAX: usize = 20;
    pub const MERIDIEM_MAX: usize = 2;
    pub const TRAY_ELAPSED_MAX: usize = 25;
    pub const LIFE_CYCLE_NAME_MAX: usize = 50;
    pub const WATER_NAME_MAX: usize = 100;
}

/// Look up a strain name by code
pub fn strain_name(code: i64) -> Option<&'static str> {
    lookups::STRAINS
        .iter()
        .find(|(id, _)| *id == code)
        .map(|(_, name)| *name)
}

/// Look up a species name by code
pub fn species_name(code: i64) -> Option<&'static str> {
    lookups::SPECIES
        .iter()
        .find(|(id, _)| *id == code)
        .map(|(_, name)| *name)
}
