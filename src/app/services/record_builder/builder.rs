//! Typed record construction from resolved rows

use super::field_parsers::{BuildWarning, ResolvedRow};
use super::schema::TableSchema;
use crate::Result;
use crate::app::models::{
    EnvironmentalReading, LifeCycleRecord, PupaMortalityRecord, ReadingKind, Record,
    SlotReading, SourceTable, WaterTemperatureRecord,
};
use crate::app::services::dump_parser::SqlValue;
use chrono::{Local, NaiveDateTime};

/// Inputs shared by every build in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildContext {
    /// Substituted for NULL `created_at` / `updated_at`
    pub now: NaiveDateTime,
}

impl BuildContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Context stamped with the local wall-clock time
    pub fn current() -> Self {
        Self::new(Local::now().naive_local())
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::current()
    }
}

/// A built record together with the degradations applied to it
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRecord {
    pub record: Record,
    pub warnings: Vec<BuildWarning>,
}

impl BuiltRecord {
    pub fn time_fallbacks(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_time_fallback()).count()
    }
}

/// Build the record for one tuple of `table`
pub fn build(table: SourceTable, values: &[SqlValue], context: &BuildContext) -> Result<BuiltRecord> {
    let row = ResolvedRow::resolve(TableSchema::for_table(table), values, context)?;

    let record = match table {
        SourceTable::EnvironmentalTemperatures => {
            Record::Environmental(build_environmental(&row, ReadingKind::Temperature)?)
        }
        SourceTable::Humidities => {
            Record::Environmental(build_environmental(&row, ReadingKind::Humidity)?)
        }
        SourceTable::Lives => Record::LifeCycle(build_life_cycle(&row)?),
        SourceTable::PupaMortalityInBreeders => Record::PupaMortality(build_pupa_mortality(&row)?),
        SourceTable::TrayWaterTemperatures => {
            Record::WaterTemperature(build_water_temperature(&row)?)
        }
    };

    Ok(BuiltRecord {
        record,
        warnings: row.into_warnings(),
    })
}

pub fn build_environmental(row: &ResolvedRow, kind: ReadingKind) -> Result<EnvironmentalReading> {
    let (value, max, min) = match kind {
        ReadingKind::Temperature => ("temperature", "max_temperature", "min_temperature"),
        ReadingKind::Humidity => ("humidity", "max_humidity", "min_humidity"),
    };

    Ok(EnvironmentalReading {
        source_id: row.identifier("id")?,
        kind,
        value: row.decimal(value)?,
        max: row.decimal(max)?,
        min: row.decimal(min)?,
        time_of_day: row.time("hour")?,
        work_area: row.optional_text("work_area")?,
        notes: row.text("observations")?,
        created_at: row.datetime("created_at")?,
        updated_at: row.datetime("updated_at")?,
    })
}

pub fn build_life_cycle(row: &ResolvedRow) -> Result<LifeCycleRecord> {
    let mut record = LifeCycleRecord {
        source_id: row.identifier("id")?,
        species: row.text("specie_id")?,
        strain: row.text("strain_id")?,
        tray_start_date: row.optional_date("tray_start_date")?,
        pupation_date: row.optional_date("pupating_date")?,
        trays_before_work: row.integer("number_of_trays_fbw")?,
        live_pupae: row.integer("live_pupae")?,
        am_pm_live_pupae: row.text("am_pm_live_pupae")?,
        dead_pupae: row.integer("dead_pupae")?,
        am_pm_dead_pupae: row.text("am_pm_dead_pupae")?,
        total_pupae: 0,
        dead_larvae: row.integer("dead_larvae")?,
        am_pm_dead_larvae: row.text("am_pm_dead_larvae")?,
        divided_trays: row.integer("divided_trays")?,
        tray_elapsed: row.text("tray_time")?,
        trays_after_work: row.integer("existing_trays_after_work_is_done")?,
        notes: row.text("observations")?,
        created_at: row.datetime("created_at")?,
        updated_at: row.datetime("updated_at")?,
    };
    record.recompute_total();
    Ok(record)
}

pub fn build_pupa_mortality(row: &ResolvedRow) -> Result<PupaMortalityRecord> {
    Ok(PupaMortalityRecord {
        source_id: row.identifier("id")?,
        strain: row.text("breeder_code")?,
        count: row.integer("dead_pupae_count")?,
        notes: row.text("observations")?,
        created_at: row.datetime("created_at")?,
        updated_at: row.datetime("updated_at")?,
    })
}

fn slot(row: &ResolvedRow, value: &str, max: &str, min: &str) -> Result<SlotReading> {
    Ok(SlotReading {
        value: row.optional_decimal(value)?,
        max: row.optional_decimal(max)?,
        min: row.optional_decimal(min)?,
    })
}

pub fn build_water_temperature(row: &ResolvedRow) -> Result<WaterTemperatureRecord> {
    Ok(WaterTemperatureRecord {
        source_id: row.identifier("id")?,
        date: row.optional_date("date")?,
        species: row.text("specie_id")?,
        strain: row.text("strain_id")?,
        tray_set_date: row.optional_date("tray_date")?,
        morning: slot(row, "temp_730am", "temp_max_730am", "temp_min_730am")?,
        midday: slot(row, "temp_1200md", "temp_max_1200md", "temp_min_1200md")?,
        afternoon: slot(row, "temp_1500pm", "temp_max_1500pm", "temp_min_1500pm")?,
        notes: row.text("observations")?,
        created_at: row.datetime("created_at")?,
        updated_at: row.datetime("updated_at")?,
    })
}
