//! SQLite record store
//!
//! Creates the five target tables on open and inserts each record in its own
//! implicit transaction. The legacy id is kept in a `UNIQUE` column so that a
//! second run over the same dump reports every row as a duplicate.

use super::{RecordStore, StoreError, duplicate_key_label, target_table};
use crate::Result;
use crate::app::models::{
    EnvironmentalReading, LifeCycleRecord, PupaMortalityRecord, Record, SourceTable,
    WaterTemperatureRecord,
};
use crate::constants::limits;
use rusqlite::{Connection, ErrorCode, ffi, params};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::debug;

/// Store backed by a SQLite database file or an in-memory database
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening SQLite database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(&schema_sql())?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn insert(&self, record: &Record) -> rusqlite::Result<i64> {
        match record {
            Record::Environmental(reading) => self.insert_environmental(record, reading)?,
            Record::LifeCycle(life) => self.insert_life_cycle(life)?,
            Record::PupaMortality(mortality) => self.insert_pupa_mortality(mortality)?,
            Record::WaterTemperature(water) => self.insert_water_temperature(water)?,
        };
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_environmental(
        &self,
        record: &Record,
        reading: &EnvironmentalReading,
    ) -> rusqlite::Result<usize> {
        let sql = format!(
            "INSERT INTO {} (legacy_id, value, max_value, min_value, time_of_day, work_area, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            target_table(record.source_table())
        );
        self.conn.execute(
            &sql,
            params![
                reading.source_id,
                reading.value.to_string(),
                reading.max.to_string(),
                reading.min.to_string(),
                reading.time_of_day,
                reading.work_area,
                reading.notes,
                reading.created_at,
                reading.updated_at,
            ],
        )
    }

    fn insert_life_cycle(&self, life: &LifeCycleRecord) -> rusqlite::Result<usize> {
        self.conn.execute(
            "INSERT INTO life_cycles (legacy_id, species, strain, tray_start_date, pupation_date,
                trays_before_work, live_pupae, am_pm_live_pupae, dead_pupae, am_pm_dead_pupae,
                total_pupae, dead_larvae, am_pm_dead_larvae, divided_trays, tray_elapsed,
                trays_after_work, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            params![
                life.source_id,
                life.species,
                life.strain,
                life.tray_start_date,
                life.pupation_date,
                life.trays_before_work,
                life.live_pupae,
                life.am_pm_live_pupae,
                life.dead_pupae,
                life.am_pm_dead_pupae,
                life.total_pupae,
                life.dead_larvae,
                life.am_pm_dead_larvae,
                life.divided_trays,
                life.tray_elapsed,
                life.trays_after_work,
                life.notes,
                life.created_at,
                life.updated_at,
            ],
        )
    }

    fn insert_pupa_mortality(&self, mortality: &PupaMortalityRecord) -> rusqlite::Result<usize> {
        self.conn.execute(
            "INSERT INTO pupa_mortalities (legacy_id, strain, count, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                mortality.source_id,
                mortality.strain,
                mortality.count,
                mortality.notes,
                mortality.created_at,
                mortality.updated_at,
            ],
        )
    }

    fn insert_water_temperature(&self, water: &WaterTemperatureRecord) -> rusqlite::Result<usize> {
        self.conn.execute(
            "INSERT INTO water_temperatures (legacy_id, date, species, strain, tray_set_date,
                temp_0730, temp_max_0730, temp_min_0730,
                temp_1200, temp_max_1200, temp_min_1200,
                temp_1500, temp_max_1500, temp_min_1500,
                notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                water.source_id,
                water.date,
                water.species,
                water.strain,
                water.tray_set_date,
                decimal_text(water.morning.value),
                decimal_text(water.morning.max),
                decimal_text(water.morning.min),
                decimal_text(water.midday.value),
                decimal_text(water.midday.max),
                decimal_text(water.midday.min),
                decimal_text(water.afternoon.value),
                decimal_text(water.afternoon.max),
                decimal_text(water.afternoon.min),
                water.notes,
                water.created_at,
                water.updated_at,
            ],
        )
    }
}

impl RecordStore for SqliteStore {
    fn create(&mut self, record: &Record) -> std::result::Result<i64, StoreError> {
        let prepared = record.prepared();
        self.insert(&prepared)
            .map_err(|e| classify(target_table(record.source_table()), record, e))
    }

    fn count(&self, table: SourceTable) -> std::result::Result<usize, StoreError> {
        let name = target_table(table);
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", name), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count as usize)
            .map_err(|e| StoreError::persistence(name, e.to_string()))
    }
}

/// Decimals are stored as text to keep their exact scale
fn decimal_text(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Map a SQLite failure to the store taxonomy
///
/// Only UNIQUE and PRIMARY KEY violations are duplicates; NOT NULL and CHECK
/// violations are persistence failures like any other.
fn classify(table: &str, record: &Record, error: rusqlite::Error) -> StoreError {
    match &error {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                ) =>
        {
            StoreError::duplicate_key(table, duplicate_key_label(record))
        }
        _ => StoreError::persistence(table, error.to_string()),
    }
}

fn environmental_table_sql(name: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            legacy_id INTEGER UNIQUE,
            value TEXT NOT NULL,
            max_value TEXT NOT NULL,
            min_value TEXT NOT NULL,
            time_of_day TEXT NOT NULL,
            work_area TEXT NOT NULL CHECK (length(work_area) <= {work_area}),
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
        work_area = limits::WORK_AREA_MAX
    )
}

/// DDL for the new schema
pub fn schema_sql() -> String {
    let life_cycles = format!(
        "CREATE TABLE IF NOT EXISTS life_cycles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            legacy_id INTEGER UNIQUE,
            species TEXT NOT NULL CHECK (length(species) <= {name}),
            strain TEXT NOT NULL CHECK (length(strain) <= {name}),
            tray_start_date TEXT,
            pupation_date TEXT,
            trays_before_work INTEGER NOT NULL,
            live_pupae INTEGER NOT NULL,
            am_pm_live_pupae TEXT NOT NULL CHECK (length(am_pm_live_pupae) <= {meridiem}),
            dead_pupae INTEGER NOT NULL,
            am_pm_dead_pupae TEXT NOT NULL CHECK (length(am_pm_dead_pupae) <= {meridiem}),
            total_pupae INTEGER NOT NULL,
            dead_larvae INTEGER NOT NULL,
            am_pm_dead_larvae TEXT NOT NULL CHECK (length(am_pm_dead_larvae) <= {meridiem}),
            divided_trays INTEGER NOT NULL,
            tray_elapsed TEXT NOT NULL CHECK (length(tray_elapsed) <= {elapsed}),
            trays_after_work INTEGER NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
        name = limits::LIFE_CYCLE_NAME_MAX,
        meridiem = limits::MERIDIEM_MAX,
        elapsed = limits::TRAY_ELAPSED_MAX,
    );

    let pupa_mortalities = format!(
        "CREATE TABLE IF NOT EXISTS pupa_mortalities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            legacy_id INTEGER UNIQUE,
            strain TEXT NOT NULL CHECK (length(strain) <= {name}),
            count INTEGER NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
        name = limits::LIFE_CYCLE_NAME_MAX,
    );

    let water_temperatures = format!(
        "CREATE TABLE IF NOT EXISTS water_temperatures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            legacy_id INTEGER UNIQUE,
            date TEXT NOT NULL,
            species TEXT NOT NULL CHECK (length(species) <= {name}),
            strain TEXT NOT NULL CHECK (length(strain) <= {name}),
            tray_set_date TEXT NOT NULL,
            temp_0730 TEXT,
            temp_max_0730 TEXT,
            temp_min_0730 TEXT,
            temp_1200 TEXT,
            temp_max_1200 TEXT,
            temp_min_1200 TEXT,
            temp_1500 TEXT,
            temp_max_1500 TEXT,
            temp_min_1500 TEXT,
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
        name = limits::WATER_NAME_MAX,
    );

    [
        environmental_table_sql(target_table(SourceTable::EnvironmentalTemperatures)),
        environmental_table_sql(target_table(SourceTable::Humidities)),
        life_cycles,
        pupa_mortalities,
        water_temperatures,
    ]
    .join("\n")
}
