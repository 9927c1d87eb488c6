//! Test fixtures for record building

use super::builder::BuildContext;
use crate::app::services::dump_parser::{SqlValue, parse_values};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

mod field_parser_tests;

/// Fixed "now" so NULL timestamps are predictable
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn test_context() -> BuildContext {
    BuildContext::new(test_now())
}

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn values(text: &str) -> Vec<SqlValue> {
    parse_values(text)
}

/// Environmental temperature tuple from the legacy dump
pub fn environmental_tuple() -> Vec<SqlValue> {
    values(
        "1, 25.5, NULL, NULL, '7:30 am', 'Área Fase Adulta', NULL, 1, '2024-01-01 08:00:00', '2024-01-01 08:00:00'",
    )
}

/// Life cycle tuple with a stale total column (99) that must be ignored
pub fn life_cycle_tuple() -> Vec<SqlValue> {
    values(
        "12, 3, 6, '2024-03-01', '2024-03-09', 10, 5, 'AM', 3, 'PM', 99, 2, 'AM', 'yes', '8 días', 9, 'ok', 4, '2024-03-10 09:00:00', '2024-03-10 10:00:00'",
    )
}

pub fn pupa_mortality_tuple() -> Vec<SqlValue> {
    values("4, 2, 17, NULL, 1, '2024-04-02 07:00:00', NULL")
}

pub fn water_temperature_tuple() -> Vec<SqlValue> {
    values(
        "8, '2024-05-06', 1, 1, '2024-05-01', 26.5, 27.125, NULL, NULL, NULL, NULL, 28, NULL, 25.75, 'Agua turbia', 1, '2024-05-06 07:45:00', '2024-05-06 15:10:00'",
    )
}
