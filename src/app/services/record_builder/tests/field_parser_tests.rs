//! Tests for generic row resolution and field coercion

use super::super::field_parsers::{
    BuildWarning, FieldValue, ResolvedRow, parse_decimal, parse_flag,
};
use super::super::schema::TableSchema;
use super::{environmental_tuple, test_context, test_now, values};
use crate::Error;
use crate::app::models::SourceTable;
use rust_decimal::Decimal;

fn schema(table: SourceTable) -> &'static TableSchema {
    TableSchema::for_table(table)
}

#[test]
fn test_null_defaults_are_applied() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::EnvironmentalTemperatures),
        &values("NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL"),
        &test_context(),
    )
    .unwrap();

    assert_eq!(row.identifier("id").unwrap(), None);
    assert_eq!(row.decimal("temperature").unwrap().to_string(), "0.0");
    assert_eq!(row.time("hour").unwrap(), chrono::NaiveTime::MIN);
    assert_eq!(row.optional_text("work_area").unwrap(), None);
    assert_eq!(row.text("observations").unwrap(), "");
    assert_eq!(row.datetime("created_at").unwrap(), test_now());
    assert!(row.warnings().is_empty());
}

#[test]
fn test_ignored_columns_are_not_resolved() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::EnvironmentalTemperatures),
        &environmental_tuple(),
        &test_context(),
    )
    .unwrap();

    assert!(row.get("user_id").is_err());
    assert_eq!(row.get("id").unwrap(), &FieldValue::Integer(1));
}

#[test]
fn test_short_row_is_a_shape_error() {
    let result = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 2, 3"),
        &test_context(),
    );

    match result {
        Err(Error::RowShape {
            table,
            expected,
            found,
        }) => {
            assert_eq!(table, "pupa_mortality_in_breeders");
            assert_eq!(expected, 7);
            assert_eq!(found, 3);
        }
        other => panic!("expected row shape error, got {other:?}"),
    }
}

#[test]
fn test_extra_values_are_ignored() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 2, 3, NULL, 1, NULL, NULL, 'extra'"),
        &test_context(),
    )
    .unwrap();

    assert_eq!(row.integer("dead_pupae_count").unwrap(), 3);
}

#[test]
fn test_time_fallback_is_reported() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::Humidities),
        &values("5, 60, 70, 50, '93', 'Insectario', '', 1, NULL, NULL"),
        &test_context(),
    )
    .unwrap();

    assert_eq!(row.time("hour").unwrap(), chrono::NaiveTime::MIN);
    assert_eq!(
        row.warnings(),
        &[BuildWarning::TimeFallback {
            field: "hour",
            raw: "93".to_string()
        }]
    );
}

#[test]
fn test_bad_integer_fails_with_context() {
    let result = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 2, 'many', NULL, 1, NULL, NULL"),
        &test_context(),
    );

    let message = result.unwrap_err().to_string();
    assert!(message.contains("pupa_mortality_in_breeders.dead_pupae_count"));
    assert!(message.contains("'many'"));
}

#[test]
fn test_bad_strain_code_fails_record() {
    let result = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 'Rockefeller', 3, NULL, 1, NULL, NULL"),
        &test_context(),
    );
    assert!(result.is_err());
}

#[test]
fn test_unknown_code_warns_and_uses_placeholder() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 42, 3, NULL, 1, NULL, NULL"),
        &test_context(),
    )
    .unwrap();

    assert_eq!(row.text("breeder_code").unwrap(), "Cepa Desconocida (42)");
    assert_eq!(
        row.warnings(),
        &[BuildWarning::UnknownCode {
            field: "breeder_code",
            code: 42
        }]
    );
}

#[test]
fn test_invalid_timestamp_fails() {
    let result = ResolvedRow::resolve(
        schema(SourceTable::PupaMortalityInBreeders),
        &values("1, 2, 3, NULL, 1, '01/02/2024', NULL"),
        &test_context(),
    );
    assert!(matches!(result, Err(Error::DateTimeParsing { .. })));
}

#[test]
fn test_empty_date_is_absent() {
    let row = ResolvedRow::resolve(
        schema(SourceTable::TrayWaterTemperatures),
        &values(
            "1, '', 1, 1, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, 1, NULL, NULL",
        ),
        &test_context(),
    )
    .unwrap();

    assert_eq!(row.optional_date("date").unwrap(), None);
    assert_eq!(row.optional_date("tray_date").unwrap(), None);
    assert_eq!(row.optional_decimal("temp_730am").unwrap(), None);
}

#[test]
fn test_decimal_rounding_and_scale() {
    let value = parse_decimal("t", "f", "27.125", 5, 2).unwrap();
    assert_eq!(value.to_string(), "27.12");

    let value = parse_decimal("t", "f", "28", 5, 2).unwrap();
    assert_eq!(value.to_string(), "28.00");

    let value = parse_decimal("t", "f", "-3.45", 5, 1).unwrap();
    assert_eq!(value, Decimal::new(-34, 1));
}

#[test]
fn test_decimal_precision_overflow() {
    assert!(parse_decimal("t", "f", "9999.9", 5, 1).is_ok());
    assert!(parse_decimal("t", "f", "10000", 5, 1).is_err());
    assert!(parse_decimal("t", "f", "1000", 5, 2).is_err());
}

#[test]
fn test_decimal_garbage() {
    assert!(matches!(
        parse_decimal("t", "f", "veinte", 5, 1),
        Err(Error::DecimalParsing { .. })
    ));
}

#[test]
fn test_flag_parsing() {
    assert_eq!(parse_flag("yes"), Some(1));
    assert_eq!(parse_flag("YES"), Some(1));
    assert_eq!(parse_flag("No"), Some(0));
    assert_eq!(parse_flag("3"), Some(3));
    assert_eq!(parse_flag("quizás"), None);
}
