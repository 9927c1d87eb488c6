//! Declarative column layouts of the legacy tables
//!
//! Each table is an ordered list of field descriptors. The generic resolver in
//! [`super::field_parsers`] walks a value list against these descriptors, so a
//! layout change is a one-line edit here rather than a change to index
//! arithmetic in every builder.

use crate::app::models::SourceTable;
use crate::constants::decimals::{
    ENVIRONMENTAL_PRECISION, ENVIRONMENTAL_SCALE, WATER_PRECISION, WATER_SCALE,
};

/// How a raw value is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Legacy primary key
    Identifier,
    Decimal { precision: u32, scale: u32 },
    Integer,
    /// Integer that also accepts "yes" / "no"
    FlaggedInteger,
    Text,
    /// Free-form time of day, recovered with fallbacks
    Time,
    Date,
    DateTime,
    StrainCode,
    SpeciesCode,
    /// Present in the dump but not carried into the record
    Ignored,
}

/// Value used when the source column is NULL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Zero,
    Empty,
    Absent,
    /// The run's timestamp from the build context
    Now,
    Midnight,
}

/// One column of a legacy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

const fn field(name: &'static str, kind: FieldKind, default: FieldDefault) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        default,
    }
}

const ENV_DECIMAL: FieldKind = FieldKind::Decimal {
    precision: ENVIRONMENTAL_PRECISION,
    scale: ENVIRONMENTAL_SCALE,
};

const WATER_DECIMAL: FieldKind = FieldKind::Decimal {
    precision: WATER_PRECISION,
    scale: WATER_SCALE,
};

/// Ordered column layout of one legacy table
#[derive(Debug)]
pub struct TableSchema {
    pub table: SourceTable,
    pub fields: &'static [FieldSpec],
}

impl TableSchema {
    /// Layout for a table
    pub fn for_table(table: SourceTable) -> &'static TableSchema {
        match table {
            SourceTable::EnvironmentalTemperatures => &ENVIRONMENTAL_TEMPERATURES,
            SourceTable::Humidities => &HUMIDITIES,
            SourceTable::Lives => &LIVES,
            SourceTable::PupaMortalityInBreeders => &PUPA_MORTALITY_IN_BREEDERS,
            SourceTable::TrayWaterTemperatures => &TRAY_WATER_TEMPERATURES,
        }
    }

    /// Number of values a tuple must carry
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether a statement header lists exactly the expected columns in order
    pub fn matches_columns(&self, columns: &[String]) -> bool {
        columns.len() == self.fields.len()
            && columns
                .iter()
                .zip(self.fields)
                .all(|(column, spec)| column == spec.name)
    }
}

pub static ENVIRONMENTAL_TEMPERATURES: TableSchema = TableSchema {
    table: SourceTable::EnvironmentalTemperatures,
    fields: &[
        field("id", FieldKind::Identifier, FieldDefault::Absent),
        field("temperature", ENV_DECIMAL, FieldDefault::Zero),
        field("max_temperature", ENV_DECIMAL, FieldDefault::Zero),
        field("min_temperature", ENV_DECIMAL, FieldDefault::Zero),
        field("hour", FieldKind::Time, FieldDefault::Midnight),
        field("work_area", FieldKind::Text, FieldDefault::Absent),
        field("observations", FieldKind::Text, FieldDefault::Empty),
        field("user_id", FieldKind::Ignored, FieldDefault::Absent),
        field("created_at", FieldKind::DateTime, FieldDefault::Now),
        field("updated_at", FieldKind::DateTime, FieldDefault::Now),
    ],
};

pub static HUMIDITIES: TableSchema = TableSchema {
    table: SourceTable::Humidities,
    fields: &[
        field("id", FieldKind::Identifier, FieldDefault::Absent),
        field("humidity", ENV_DECIMAL, FieldDefault::Zero),
        field("max_humidity", ENV_DECIMAL, FieldDefault::Zero),
        field("min_humidity", ENV_DECIMAL, FieldDefault::Zero),
        field("hour", FieldKind::Time, FieldDefault::Midnight),
        field("work_area", FieldKind::Text, FieldDefault::Absent),
        field("observations", FieldKind::Text, FieldDefault::Empty),
        field("user_id", FieldKind::Ignored, FieldDefault::Absent),
        field("created_at", FieldKind::DateTime, FieldDefault::Now),
        field("updated_at", FieldKind::DateTime, FieldDefault::Now),
    ],
};

pub static LIVES: TableSchema = TableSchema {
    table: SourceTable::Lives,
    fields: &[
        field("id", FieldKind::Identifier, FieldDefault::Absent),
        field("specie_id", FieldKind::SpeciesCode, FieldDefault::Empty),
        field("strain_id", FieldKind::StrainCode, FieldDefault::Empty),
        field("tray_start_date", FieldKind::Date, FieldDefault::Absent),
        field("pupating_date", FieldKind::Date, FieldDefault::Absent),
        field("number_of_trays_fbw", FieldKind::Integer, FieldDefault::Zero),
        field("live_pupae", FieldKind::Integer, FieldDefault::Zero),
        field("am_pm_live_pupae", FieldKind::Text, FieldDefault::Empty),
        field("dead_pupae", FieldKind::Integer, FieldDefault::Zero),
        field("am_pm_dead_pupae", FieldKind::Text, FieldDefault::Empty),
        // Recomputed from live and dead pupae
        field("total_live_and_dead_pupae", FieldKind::Ignored, FieldDefault::Absent),
        field("dead_larvae", FieldKind::Integer, FieldDefault::Zero),
        field("am_pm_dead_larvae", FieldKind::Text, FieldDefault::Empty),
        field("divided_trays", FieldKind::FlaggedInteger, FieldDefault::Zero),
        field("tray_time", FieldKind::Text, FieldDefault::Empty),
        field("existing_trays_after_work_is_done", FieldKind::Integer, FieldDefault::Zero),
        field("observations", FieldKind::Text, FieldDefault::Empty),
        field("user_id", FieldKind::Ignored, FieldDefault::Absent),
        field("created_at", FieldKind::DateTime, FieldDefault::Now),
        field("updated_at", FieldKind::DateTime, FieldDefault::Now),
    ],
};

pub static PUPA_MORTALITY_IN_BREEDERS: TableSchema = TableSchema {
    table: SourceTable::PupaMortalityInBreeders,
    fields: &[
        field("id", FieldKind::Identifier, FieldDefault::Absent),
        field("breeder_code", FieldKind::StrainCode, FieldDefault::Empty),
        field("dead_pupae_count", FieldKind::Integer, FieldDefault::Zero),
        field("observations", FieldKind::Text, FieldDefault::Empty),
        field("user_id", FieldKind::Ignored, FieldDefault::Absent),
        field("created_at", FieldKind::DateTime, FieldDefault::Now),
        field("updated_at", FieldKind::DateTime, FieldDefault::Now),
    ],
};

pub static TRAY_WATER_TEMPERATURES: TableSchema = TableSchema {
    table: SourceTable::TrayWaterTemperatures,
    fields: &[
        field("id", FieldKind::Identifier, FieldDefault::Absent),
        field("date", FieldKind::Date, FieldDefault::Absent),
        field("specie_id", FieldKind::SpeciesCode, FieldDefault::Empty),
        field("strain_id", FieldKind::StrainCode, FieldDefault::Empty),
        field("tray_date", FieldKind::Date, FieldDefault::Absent),
        field("temp_730am", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_max_730am", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_min_730am", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_1200md", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_max_1200md", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_min_1200md", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_1500pm", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_max_1500pm", WATER_DECIMAL, FieldDefault::Absent),
        field("temp_min_1500pm", WATER_DECIMAL, FieldDefault::Absent),
        field("observations", FieldKind::Text, FieldDefault::Empty),
        field("user_id", FieldKind::Ignored, FieldDefault::Absent),
        field("created_at", FieldKind::DateTime, FieldDefault::Now),
        field("updated_at", FieldKind::DateTime, FieldDefault::Now),
    ],
};
