//! Test fixtures for the record stores

use crate::app::models::{
    EnvironmentalReading, LifeCycleRecord, PupaMortalityRecord, ReadingKind, Record, SlotReading,
    WaterTemperatureRecord,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;


pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn temperature(source_id: Option<i64>) -> Record {
    Record::Environmental(EnvironmentalReading {
        source_id,
        kind: ReadingKind::Temperature,
        value: Decimal::new(255, 1),
        max: Decimal::new(0, 1),
        min: Decimal::new(0, 1),
        time_of_day: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
        work_area: Some("Área Fase Adulta".to_string()),
        notes: String::new(),
        created_at: timestamp(),
        updated_at: timestamp(),
    })
}

pub fn humidity(source_id: Option<i64>) -> Record {
    match temperature(source_id) {
        Record::Environmental(mut reading) => {
            reading.kind = ReadingKind::Humidity;
            Record::Environmental(reading)
        }
        other => other,
    }
}

pub fn life_cycle(source_id: Option<i64>) -> LifeCycleRecord {
    LifeCycleRecord {
        source_id,
        species: "Aedes aegypti".to_string(),
        strain: "Rockefeller".to_string(),
        tray_start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        pupation_date: None,
        trays_before_work: 10,
        live_pupae: 5,
        am_pm_live_pupae: "AM".to_string(),
        dead_pupae: 3,
        am_pm_dead_pupae: "PM".to_string(),
        total_pupae: 8,
        dead_larvae: 2,
        am_pm_dead_larvae: "AM".to_string(),
        divided_trays: 1,
        tray_elapsed: "8 días".to_string(),
        trays_after_work: 9,
        notes: String::new(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn pupa_mortality(source_id: Option<i64>) -> Record {
    Record::PupaMortality(PupaMortalityRecord {
        source_id,
        strain: "Bajo Chiquito".to_string(),
        count: 17,
        notes: String::new(),
        created_at: timestamp(),
        updated_at: timestamp(),
    })
}

pub fn water_temperature(source_id: Option<i64>) -> WaterTemperatureRecord {
    WaterTemperatureRecord {
        source_id,
        date: NaiveDate::from_ymd_opt(2024, 5, 6),
        species: "Anopheles albimanus".to_string(),
        strain: "Agua Clara".to_string(),
        tray_set_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        morning: SlotReading {
            value: Some(Decimal::new(2650, 2)),
            max: None,
            min: None,
        },
        midday: SlotReading::default(),
        afternoon: SlotReading::default(),
        notes: "Agua turbia".to_string(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}
