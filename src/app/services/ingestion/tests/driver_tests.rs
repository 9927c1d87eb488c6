//! Tests for the ingestion driver

use super::super::driver::IngestionDriver;
use super::{create_full_dump, test_context};
use crate::app::models::{Record, SourceTable};
use crate::app::services::storage::{MemoryStore, RecordStore, SqliteStore};
use chrono::NaiveTime;
use rust_decimal::Decimal;

#[test]
fn test_single_environmental_row_end_to_end() {
    let dump = "INSERT INTO `environmental_temperatures` (`id`, `temperature`, `max_temperature`, `min_temperature`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 25.5, NULL, NULL, '7:30 am', 'Área Fase Adulta', NULL, 1, '2024-01-01 08:00:00', '2024-01-01 08:00:00');";

    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(dump).unwrap();

    let stats = report.table(SourceTable::EnvironmentalTemperatures).unwrap();
    assert_eq!(stats.tuples_seen, 1);
    assert_eq!(stats.created, 1);

    let store = driver.into_store();
    assert_eq!(store.len(), 1);
    let Record::Environmental(reading) = &store.records()[0] else {
        panic!("expected environmental reading");
    };
    assert_eq!(reading.value, Decimal::new(255, 1));
    assert_eq!(reading.max, Decimal::ZERO);
    assert_eq!(reading.min, Decimal::ZERO);
    assert_eq!(reading.time_of_day, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
    assert_eq!(reading.work_area.as_deref(), Some("Área Fase Adulta"));
    assert_eq!(reading.notes, "");
}

#[test]
fn test_full_dump_outcomes_per_table() {
    let dump = create_full_dump();
    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(&dump).unwrap();

    let tables: Vec<SourceTable> = report.tables.iter().map(|t| t.table).collect();
    assert_eq!(tables, SourceTable::ALL.to_vec());

    let temperatures = report.table(SourceTable::EnvironmentalTemperatures).unwrap();
    assert_eq!(temperatures.created, 2);

    let humidities = report.table(SourceTable::Humidities).unwrap();
    assert_eq!(humidities.created, 1);
    assert_eq!(humidities.time_fallbacks, 1);

    let lives = report.table(SourceTable::Lives).unwrap();
    assert_eq!(lives.created, 1);

    let mortality = report.table(SourceTable::PupaMortalityInBreeders).unwrap();
    assert_eq!(mortality.tuples_seen, 4);
    assert_eq!(mortality.created, 2);
    assert_eq!(mortality.duplicates, 1);
    assert_eq!(mortality.build_failures, 1);
    assert_eq!(mortality.degraded_fields, 1);
    assert!(mortality.errors[0].contains("source id 2"));
    assert!(mortality.errors[0].contains("'x'"));

    let water = report.table(SourceTable::TrayWaterTemperatures).unwrap();
    assert_eq!(water.created, 1);
    assert_eq!(water.persist_failures, 1);

    assert_eq!(report.tuples_seen(), 10);
    assert_eq!(report.created(), 7);
    assert_eq!(report.duplicates(), 1);
    assert_eq!(report.failures(), 2);
}

#[test]
fn test_duplicate_does_not_stop_later_tuples() {
    let dump = create_full_dump();
    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context())
        .with_tables(&[SourceTable::PupaMortalityInBreeders]);
    driver.run(&dump).unwrap();

    let store = driver.into_store();
    let strains: Vec<String> = store
        .records_for(SourceTable::PupaMortalityInBreeders)
        .into_iter()
        .filter_map(|record| match record {
            Record::PupaMortality(m) => Some(m.strain.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(strains, vec!["Bajo Chiquito", "Cepa Desconocida (9)"]);
}

#[test]
fn test_second_run_reports_only_duplicates() {
    let dump = create_full_dump();
    let store = SqliteStore::open_in_memory().unwrap();

    let mut driver = IngestionDriver::new(store, test_context());
    let first = driver.run(&dump).unwrap();
    let second = driver.run(&dump).unwrap();

    assert_eq!(first.created(), 7);
    assert_eq!(second.created(), 0);
    assert_eq!(second.duplicates(), 8);
    assert_eq!(second.failures(), 2);
    assert_eq!(
        driver
            .store()
            .count(SourceTable::EnvironmentalTemperatures)
            .unwrap(),
        2
    );
}

#[test]
fn test_memory_and_sqlite_agree() {
    let dump = create_full_dump();

    let mut memory = IngestionDriver::new(MemoryStore::new(), test_context());
    let mut sqlite = IngestionDriver::new(SqliteStore::open_in_memory().unwrap(), test_context());

    let outcomes = |report: crate::app::services::ingestion::IngestReport| {
        report
            .tables
            .iter()
            .map(|t| (t.table, t.created, t.duplicates, t.build_failures, t.persist_failures))
            .collect::<Vec<_>>()
    };

    assert_eq!(
        outcomes(memory.run(&dump).unwrap()),
        outcomes(sqlite.run(&dump).unwrap())
    );
}

#[test]
fn test_with_tables_keeps_fixed_order() {
    let driver = IngestionDriver::new(MemoryStore::new(), test_context()).with_tables(&[
        SourceTable::TrayWaterTemperatures,
        SourceTable::EnvironmentalTemperatures,
    ]);

    assert_eq!(
        driver.tables(),
        &[
            SourceTable::EnvironmentalTemperatures,
            SourceTable::TrayWaterTemperatures
        ]
    );
}

#[test]
fn test_schema_drift_is_counted_but_rows_processed() {
    let dump = "INSERT INTO `pupa_mortality_in_breeders` (`id`, `strain`, `count`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (5, 1, 2, NULL, 1, NULL, NULL);";

    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(dump).unwrap();

    let stats = report.table(SourceTable::PupaMortalityInBreeders).unwrap();
    assert_eq!(stats.schema_drift, 1);
    assert_eq!(stats.created, 1);
}

#[test]
fn test_short_tuple_is_build_failure() {
    let dump = "INSERT INTO `lives` (`id`, `specie_id`) VALUES (1, 3), (2, 1);";

    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(dump).unwrap();

    let lives = report.table(SourceTable::Lives).unwrap();
    assert_eq!(lives.tuples_seen, 2);
    assert_eq!(lives.build_failures, 2);
    assert_eq!(lives.schema_drift, 1);
    assert_eq!(lives.created, 0);
}

#[test]
fn test_empty_dump_yields_empty_tables() {
    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run("-- nothing here").unwrap();

    assert_eq!(report.tables.len(), 5);
    assert_eq!(report.tuples_seen(), 0);
    assert!(report.is_successful());
}

#[test]
fn test_escaped_quote_does_not_drop_later_rows() {
    let dump = r"INSERT INTO `pupa_mortality_in_breeders` (`id`, `breeder_code`, `dead_pupae_count`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 2, 17, 'cage d\'Ana, norte', 1, NULL, NULL),(2, 3, 4, NULL, 1, NULL, NULL),(3, 1, 6, 'ok', 1, NULL, NULL);";

    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(dump).unwrap();

    let stats = report.table(SourceTable::PupaMortalityInBreeders).unwrap();
    assert_eq!(stats.tuples_seen, 3);
    assert_eq!(stats.created, 3);
    assert_eq!(stats.skipped_statements, 0);
    assert!(report.is_successful());

    let store = driver.into_store();
    let Record::PupaMortality(first) = &store.records()[0] else {
        panic!("expected pupa mortality record");
    };
    assert_eq!(first.notes, r"cage d\'Ana, norte");
}

#[test]
fn test_malformed_statement_is_reported() {
    let dump = "INSERT INTO `pupa_mortality_in_breeders` (`id`, `breeder_code`, `dead_pupae_count`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 2, 17, 'open, 1, NULL, NULL),(2, 3, 4, NULL, 1, NULL, NULL);\nINSERT INTO `pupa_mortality_in_breeders` (`id`, `breeder_code`, `dead_pupae_count`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (7, 1, 1, NULL, 1, NULL, NULL);";

    let mut driver = IngestionDriver::new(MemoryStore::new(), test_context());
    let report = driver.run(dump).unwrap();

    let stats = report.table(SourceTable::PupaMortalityInBreeders).unwrap();
    assert_eq!(stats.skipped_statements, 1);
    assert_eq!(stats.created, 1);
    assert_eq!(report.skipped_statements(), 1);
    assert!(!report.is_successful());
}
