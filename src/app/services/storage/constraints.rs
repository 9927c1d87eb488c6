//! Column constraints of the new schema
//!
//! The SQLite store enforces these with `NOT NULL` and `CHECK` clauses; the
//! memory store calls [`check_constraints`] so a dry run rejects the same rows.

use super::{StoreError, target_table};
use crate::app::models::Record;
use crate::constants::limits;

fn max_length(table: &str, column: &str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.chars().count() > max {
        return Err(StoreError::persistence(
            table,
            format!("CHECK constraint failed: length({}) <= {}", column, max),
        ));
    }
    Ok(())
}

fn required<T>(table: &str, column: &str, value: Option<T>) -> Result<T, StoreError> {
    value.ok_or_else(|| {
        StoreError::persistence(
            table,
            format!("NOT NULL constraint failed: {}.{}", table, column),
        )
    })
}

/// Check a record against the constraints of its target table
pub fn check_constraints(record: &Record) -> Result<(), StoreError> {
    let table = target_table(record.source_table());

    match record {
        Record::Environmental(reading) => {
            let work_area = required(table, "work_area", reading.work_area.as_deref())?;
            max_length(table, "work_area", work_area, limits::WORK_AREA_MAX)
        }
        Record::LifeCycle(life) => {
            max_length(table, "species", &life.species, limits::LIFE_CYCLE_NAME_MAX)?;
            max_length(table, "strain", &life.strain, limits::LIFE_CYCLE_NAME_MAX)?;
            max_length(table, "am_pm_live_pupae", &life.am_pm_live_pupae, limits::MERIDIEM_MAX)?;
            max_length(table, "am_pm_dead_pupae", &life.am_pm_dead_pupae, limits::MERIDIEM_MAX)?;
            max_length(table, "am_pm_dead_larvae", &life.am_pm_dead_larvae, limits::MERIDIEM_MAX)?;
            max_length(table, "tray_elapsed", &life.tray_elapsed, limits::TRAY_ELAPSED_MAX)
        }
        Record::PupaMortality(mortality) => {
            max_length(table, "strain", &mortality.strain, limits::LIFE_CYCLE_NAME_MAX)
        }
        Record::WaterTemperature(water) => {
            required(table, "date", water.date)?;
            required(table, "tray_set_date", water.tray_set_date)?;
            max_length(table, "species", &water.species, limits::WATER_NAME_MAX)?;
            max_length(table, "strain", &water.strain, limits::WATER_NAME_MAX)
        }
    }
}
