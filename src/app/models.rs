//! Data models for insectary ingestion
//!
//! This module contains the typed records produced from the legacy dump: the
//! environmental temperature and humidity readings, the life cycle (tray)
//! records, the pupa mortality counts and the tray water temperature sheets.

use crate::constants::tables;
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Source Tables
// =============================================================================

/// Legacy tables carried by the dump, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    EnvironmentalTemperatures,
    Humidities,
    Lives,
    PupaMortalityInBreeders,
    TrayWaterTemperatures,
}

impl SourceTable {
    /// All tables in the fixed processing order
    pub const ALL: [SourceTable; 5] = [
        SourceTable::EnvironmentalTemperatures,
        SourceTable::Humidities,
        SourceTable::Lives,
        SourceTable::PupaMortalityInBreeders,
        SourceTable::TrayWaterTemperatures,
    ];

    /// Table name as written in the dump's `INSERT INTO` statements
    pub fn table_name(&self) -> &'static str {
        match self {
            SourceTable::EnvironmentalTemperatures => tables::ENVIRONMENTAL_TEMPERATURES,
            SourceTable::Humidities => tables::HUMIDITIES,
            SourceTable::Lives => tables::LIVES,
            SourceTable::PupaMortalityInBreeders => tables::PUPA_MORTALITY_IN_BREEDERS,
            SourceTable::TrayWaterTemperatures => tables::TRAY_WATER_TEMPERATURES,
        }
    }

    /// Human readable name of the record type built from this table
    pub fn record_name(&self) -> &'static str {
        match self {
            SourceTable::EnvironmentalTemperatures => "temperature",
            SourceTable::Humidities => "humidity",
            SourceTable::Lives => "life cycle",
            SourceTable::PupaMortalityInBreeders => "pupa mortality",
            SourceTable::TrayWaterTemperatures => "water temperature",
        }
    }

    /// Look up a table by its dump name
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.table_name() == name)
    }
}

impl FromStr for SourceTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_table_name(s.trim()).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown table '{}'. Known tables: {}",
                s.trim(),
                tables::ALL.join(", ")
            ))
        })
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

// =============================================================================
// Environmental Readings
// =============================================================================

/// Distinguishes the two environmental tables that share one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Temperature,
    Humidity,
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingKind::Temperature => write!(f, "Temperature"),
            ReadingKind::Humidity => write!(f, "Humidity"),
        }
    }
}

/// Work-area temperature or humidity reading
///
/// Missing values in the source default to 0.0 and an unparseable hour
/// defaults to midnight, so only the work area can be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Legacy primary key, used for duplicate detection
    pub source_id: Option<i64>,
    pub kind: ReadingKind,
    pub value: Decimal,
    pub max: Decimal,
    pub min: Decimal,
    pub time_of_day: NaiveTime,
    /// None when the source column is null; storage rejects it
    pub work_area: Option<String>,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// =============================================================================
// Life Cycle Records
// =============================================================================

/// Breeding tray life cycle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeCycleRecord {
    pub source_id: Option<i64>,
    pub species: String,
    pub strain: String,
    pub tray_start_date: Option<NaiveDate>,
    pub pupation_date: Option<NaiveDate>,
    pub trays_before_work: i32,
    pub live_pupae: i32,
    pub am_pm_live_pupae: String,
    pub dead_pupae: i32,
    pub am_pm_dead_pupae: String,
    /// Always `live_pupae + dead_pupae`; the source column is ignored
    pub total_pupae: i32,
    pub dead_larvae: i32,
    pub am_pm_dead_larvae: String,
    pub divided_trays: i32,
    pub tray_elapsed: String,
    pub trays_after_work: i32,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl LifeCycleRecord {
    /// Sum of live and dead pupae
    pub fn computed_total(&self) -> i32 {
        self.live_pupae.saturating_add(self.dead_pupae)
    }

    /// Refresh the derived total from the current counts
    pub fn recompute_total(&mut self) {
        self.total_pupae = self.computed_total();
    }
}

// =============================================================================
// Pupa Mortality
// =============================================================================

/// Dead pupae counted in a breeder cage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PupaMortalityRecord {
    pub source_id: Option<i64>,
    pub strain: String,
    pub count: i32,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// =============================================================================
// Tray Water Temperatures
// =============================================================================

/// Daily measurement slots of the water temperature sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
    Morning,
    Midday,
    Afternoon,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Midday, TimeSlot::Afternoon];

    /// Label used on the paper sheet
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "07:30",
            TimeSlot::Midday => "12:00",
            TimeSlot::Afternoon => "15:00",
        }
    }
}

/// Value, maximum and minimum read in one slot; each may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotReading {
    pub value: Option<Decimal>,
    pub max: Option<Decimal>,
    pub min: Option<Decimal>,
}

impl SlotReading {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.max.is_none() && self.min.is_none()
    }
}

/// Water temperature of the breeding trays at 07:30, 12:00 and 15:00
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterTemperatureRecord {
    pub source_id: Option<i64>,
    /// Required by storage even though the dump allows null
    pub date: Option<NaiveDate>,
    pub species: String,
    pub strain: String,
    pub tray_set_date: Option<NaiveDate>,
    pub morning: SlotReading,
    pub midday: SlotReading,
    pub afternoon: SlotReading,
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl WaterTemperatureRecord {
    pub fn slot(&self, slot: TimeSlot) -> &SlotReading {
        match slot {
            TimeSlot::Morning => &self.morning,
            TimeSlot::Midday => &self.midday,
            TimeSlot::Afternoon => &self.afternoon,
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// Any record the builders can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Environmental(EnvironmentalReading),
    LifeCycle(LifeCycleRecord),
    PupaMortality(PupaMortalityRecord),
    WaterTemperature(WaterTemperatureRecord),
}

impl Record {
    /// Table the record was built from
    pub fn source_table(&self) -> SourceTable {
        match self {
            Record::Environmental(reading) => match reading.kind {
                ReadingKind::Temperature => SourceTable::EnvironmentalTemperatures,
                ReadingKind::Humidity => SourceTable::Humidities,
            },
            Record::LifeCycle(_) => SourceTable::Lives,
            Record::PupaMortality(_) => SourceTable::PupaMortalityInBreeders,
            Record::WaterTemperature(_) => SourceTable::TrayWaterTemperatures,
        }
    }

    /// Legacy primary key of the source row
    pub fn source_id(&self) -> Option<i64> {
        match self {
            Record::Environmental(r) => r.source_id,
            Record::LifeCycle(r) => r.source_id,
            Record::PupaMortality(r) => r.source_id,
            Record::WaterTemperature(r) => r.source_id,
        }
    }

    /// Copy of the record with derived fields refreshed, as stores persist it
    pub fn prepared(&self) -> Record {
        let mut record = self.clone();
        if let Record::LifeCycle(life) = &mut record {
            life.recompute_total();
        }
        record
    }
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn display_id(id: Option<i64>) -> String {
    id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Environmental(r) => write!(
                f,
                "{} {} at {}",
                r.kind,
                r.value,
                r.time_of_day.format("%H:%M")
            ),
            Record::LifeCycle(r) => write!(
                f,
                "Life cycle record {} - tray start: {}",
                display_id(r.source_id),
                display_date(r.tray_start_date)
            ),
            Record::PupaMortality(r) => write!(
                f,
                "Pupa mortality {} - count: {}",
                display_id(r.source_id),
                r.count
            ),
            Record::WaterTemperature(r) => write!(
                f,
                "Water temperature record {} - {} ({})",
                display_date(r.date),
                r.species,
                r.strain
            ),
        }
    }
}
