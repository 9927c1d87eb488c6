//! Field coercion for dump values
//!
//! This module resolves a normalized value list against a [`TableSchema`],
//! applying the per-field defaults for NULL and failing with the table and
//! column name when a value cannot be coerced.

use super::builder::BuildContext;
use super::lookup::{self, LookupKind};
use super::schema::{FieldDefault, FieldKind, FieldSpec, TableSchema};
use super::time_recovery;
use crate::app::models::SourceTable;
use crate::app::services::dump_parser::SqlValue;
use crate::constants::{divided_trays, formats};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A coerced field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Time(NaiveTime),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Degradations applied while resolving a row
///
/// None of these fail the record; the driver logs and counts them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// Time text could not be read and became midnight
    TimeFallback { field: &'static str, raw: String },
    /// Divided-trays text was neither yes/no nor an integer and became 0
    UnrecognizedFlag { field: &'static str, raw: String },
    /// Code missing from the lookup table; a placeholder name was used
    UnknownCode { field: &'static str, code: i64 },
}

impl BuildWarning {
    pub fn is_time_fallback(&self) -> bool {
        matches!(self, BuildWarning::TimeFallback { .. })
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::TimeFallback { field, raw } => {
                write!(f, "{}: unreadable time '{}', using 00:00", field, raw)
            }
            BuildWarning::UnrecognizedFlag { field, raw } => {
                write!(f, "{}: unrecognized value '{}', using 0", field, raw)
            }
            BuildWarning::UnknownCode { field, code } => {
                write!(f, "{}: unknown code {}, using placeholder name", field, code)
            }
        }
    }
}

/// A value list resolved against a table layout
#[derive(Debug, Clone)]
pub struct ResolvedRow {
    table: SourceTable,
    values: HashMap<&'static str, FieldValue>,
    warnings: Vec<BuildWarning>,
}

impl ResolvedRow {
    /// Coerce `values` positionally against `schema`
    ///
    /// Values beyond the layout are ignored; a shorter list is an error.
    pub fn resolve(
        schema: &TableSchema,
        values: &[SqlValue],
        context: &BuildContext,
    ) -> Result<Self> {
        if values.len() < schema.len() {
            return Err(Error::row_shape(
                schema.table.table_name(),
                schema.len(),
                values.len(),
            ));
        }

        let mut row = Self {
            table: schema.table,
            values: HashMap::with_capacity(schema.len()),
            warnings: Vec::new(),
        };

        for (spec, value) in schema.fields.iter().zip(values) {
            if spec.kind == FieldKind::Ignored {
                continue;
            }
            let resolved = match value.as_str() {
                None => default_value(spec, context),
                Some(raw) => row.coerce(spec, raw, context)?,
            };
            row.values.insert(spec.name, resolved);
        }

        Ok(row)
    }

    fn coerce(&mut self, spec: &FieldSpec, raw: &str, context: &BuildContext) -> Result<FieldValue> {
        let table = self.table.table_name();
        let value = match spec.kind {
            FieldKind::Identifier | FieldKind::Integer => {
                FieldValue::Integer(parse_integer(table, spec.name, raw)?)
            }
            FieldKind::Decimal { precision, scale } => {
                FieldValue::Decimal(parse_decimal(table, spec.name, raw, precision, scale)?)
            }
            FieldKind::FlaggedInteger => match parse_flag(raw) {
                Some(flag) => FieldValue::Integer(flag),
                None => {
                    self.warnings.push(BuildWarning::UnrecognizedFlag {
                        field: spec.name,
                        raw: raw.to_string(),
                    });
                    FieldValue::Integer(0)
                }
            },
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Time => match time_recovery::recover_strict(raw) {
                Some(time) => FieldValue::Time(time),
                None => {
                    self.warnings.push(BuildWarning::TimeFallback {
                        field: spec.name,
                        raw: raw.to_string(),
                    });
                    FieldValue::Time(NaiveTime::MIN)
                }
            },
            // An empty date string is treated like NULL
            FieldKind::Date if raw.is_empty() => default_value(spec, context),
            FieldKind::Date => FieldValue::Date(parse_date(table, spec.name, raw)?),
            FieldKind::DateTime if raw.is_empty() => default_value(spec, context),
            FieldKind::DateTime => FieldValue::DateTime(parse_datetime(table, spec.name, raw)?),
            FieldKind::StrainCode => self.resolve_code(LookupKind::Strain, spec, raw)?,
            FieldKind::SpeciesCode => self.resolve_code(LookupKind::Species, spec, raw)?,
            FieldKind::Ignored => FieldValue::Absent,
        };
        Ok(value)
    }

    fn resolve_code(&mut self, kind: LookupKind, spec: &FieldSpec, raw: &str) -> Result<FieldValue> {
        let code = parse_integer(self.table.table_name(), spec.name, raw)?;
        if !lookup::is_known(kind, code) {
            self.warnings.push(BuildWarning::UnknownCode {
                field: spec.name,
                code,
            });
        }
        Ok(FieldValue::Text(lookup::resolve(kind, Some(code))))
    }

    pub fn table(&self) -> SourceTable {
        self.table
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<BuildWarning> {
        self.warnings
    }

    /// Raw access to a resolved field
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        self.values.get(name).ok_or_else(|| {
            Error::data_validation(format!(
                "Field '{}' is not part of the '{}' layout",
                name, self.table
            ))
        })
    }

    fn type_error(&self, name: &str, expected: &str, found: &FieldValue) -> Error {
        Error::data_validation(format!(
            "Field '{}.{}' expected {}, found {:?}",
            self.table, name, expected, found
        ))
    }

    pub fn identifier(&self, name: &str) -> Result<Option<i64>> {
        match self.get(name)? {
            FieldValue::Absent => Ok(None),
            FieldValue::Integer(id) => Ok(Some(*id)),
            other => Err(self.type_error(name, "an identifier", other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i32> {
        match self.get(name)? {
            FieldValue::Integer(value) => i32::try_from(*value).map_err(|_| {
                Error::data_validation(format!(
                    "Field '{}.{}' value {} is out of range",
                    self.table, name, value
                ))
            }),
            other => Err(self.type_error(name, "an integer", other)),
        }
    }

    pub fn decimal(&self, name: &str) -> Result<Decimal> {
        match self.get(name)? {
            FieldValue::Decimal(value) => Ok(*value),
            other => Err(self.type_error(name, "a decimal", other)),
        }
    }

    pub fn optional_decimal(&self, name: &str) -> Result<Option<Decimal>> {
        match self.get(name)? {
            FieldValue::Absent => Ok(None),
            FieldValue::Decimal(value) => Ok(Some(*value)),
            other => Err(self.type_error(name, "a decimal", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<String> {
        match self.get(name)? {
            FieldValue::Text(value) => Ok(value.clone()),
            other => Err(self.type_error(name, "text", other)),
        }
    }

    pub fn optional_text(&self, name: &str) -> Result<Option<String>> {
        match self.get(name)? {
            FieldValue::Absent => Ok(None),
            FieldValue::Text(value) => Ok(Some(value.clone())),
            other => Err(self.type_error(name, "text", other)),
        }
    }

    pub fn time(&self, name: &str) -> Result<NaiveTime> {
        match self.get(name)? {
            FieldValue::Time(value) => Ok(*value),
            other => Err(self.type_error(name, "a time", other)),
        }
    }

    pub fn optional_date(&self, name: &str) -> Result<Option<NaiveDate>> {
        match self.get(name)? {
            FieldValue::Absent => Ok(None),
            FieldValue::Date(value) => Ok(Some(*value)),
            other => Err(self.type_error(name, "a date", other)),
        }
    }

    pub fn datetime(&self, name: &str) -> Result<NaiveDateTime> {
        match self.get(name)? {
            FieldValue::DateTime(value) => Ok(*value),
            other => Err(self.type_error(name, "a timestamp", other)),
        }
    }
}

/// Value substituted for a NULL column
pub fn default_value(spec: &FieldSpec, context: &BuildContext) -> FieldValue {
    match (spec.default, spec.kind) {
        (FieldDefault::Zero, FieldKind::Decimal { scale, .. }) => {
            FieldValue::Decimal(Decimal::new(0, scale))
        }
        (FieldDefault::Zero, _) => FieldValue::Integer(0),
        (FieldDefault::Empty, _) => FieldValue::Text(String::new()),
        (FieldDefault::Absent, _) => FieldValue::Absent,
        (FieldDefault::Now, _) => FieldValue::DateTime(context.now),
        (FieldDefault::Midnight, _) => FieldValue::Time(NaiveTime::MIN),
    }
}

pub fn parse_integer(table: &str, field: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|e| {
        Error::data_validation(format!(
            "Invalid integer for {}.{}: '{}' ({})",
            table, field, raw, e
        ))
    })
}

/// Parse a decimal, round it to `scale` places and check it fits `precision` digits
pub fn parse_decimal(
    table: &str,
    field: &str,
    raw: &str,
    precision: u32,
    scale: u32,
) -> Result<Decimal> {
    let parsed = Decimal::from_str(raw).map_err(|e| {
        Error::decimal_parsing(format!("Invalid decimal for {}.{}: '{}'", table, field, raw), e)
    })?;

    let mut value = parsed.round_dp(scale);
    value.rescale(scale);

    let integral = value.trunc().abs();
    let integer_digits = if integral.is_zero() {
        0
    } else {
        integral.to_string().len() as u32
    };
    if integer_digits > precision.saturating_sub(scale) {
        return Err(Error::data_validation(format!(
            "Value {} for {}.{} does not fit {} digits with {} decimal places",
            raw, table, field, precision, scale
        )));
    }

    Ok(value)
}

/// Read a yes/no/integer flag; None when the text is none of those
pub fn parse_flag(raw: &str) -> Option<i64> {
    if raw.eq_ignore_ascii_case(divided_trays::YES) {
        Some(1)
    } else if raw.eq_ignore_ascii_case(divided_trays::NO) {
        Some(0)
    } else {
        raw.parse::<i64>().ok()
    }
}

pub fn parse_date(table: &str, field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, formats::DATE).map_err(|e| {
        Error::datetime_parsing(
            format!("Invalid date for {}.{}: '{}' (expected YYYY-MM-DD)", table, field, raw),
            e,
        )
    })
}

pub fn parse_datetime(table: &str, field: &str, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, formats::DATETIME).map_err(|e| {
        Error::datetime_parsing(
            format!(
                "Invalid timestamp for {}.{}: '{}' (expected YYYY-MM-DD HH:MM:SS)",
                table, field, raw
            ),
            e,
        )
    })
}
