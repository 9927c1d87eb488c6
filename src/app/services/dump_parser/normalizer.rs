//! Normalization of raw tokens into typed SQL values

use super::tokenizer::split_tuple;
use serde::Serialize;
use std::fmt;

/// A single value of a dump tuple after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// The `NULL` keyword, in any case
    Null,
    /// A single-quoted string with its quotes and outer whitespace removed
    Quoted(String),
    /// Anything else, usually a number, passed through after trimming
    Literal(String),
}

impl SqlValue {
    /// Text of the value, or None for NULL
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Null => None,
            SqlValue::Quoted(text) | SqlValue::Literal(text) => Some(text),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Quoted(text) => write!(f, "'{}'", text),
            SqlValue::Literal(text) => write!(f, "{}", text),
        }
    }
}

/// Normalize one raw token
///
/// No escape sequences are interpreted: exactly one leading and one trailing
/// quote are removed and the remainder is trimmed.
pub fn normalize_token(token: &str) -> SqlValue {
    let trimmed = token.trim();

    if trimmed.eq_ignore_ascii_case("NULL") {
        return SqlValue::Null;
    }

    if trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        let inner = if trimmed.len() >= 2 {
            &trimmed[1..trimmed.len() - 1]
        } else {
            ""
        };
        return SqlValue::Quoted(inner.trim().to_string());
    }

    SqlValue::Literal(trimmed.to_string())
}

/// Tokenize and normalize the inner text of a value group
pub fn parse_values(text: &str) -> Vec<SqlValue> {
    split_tuple(text).into_iter().map(normalize_token).collect()
}

/// Render values for diagnostics, e.g. `[1, 'Insectario', NULL]`
pub fn format_values(values: &[SqlValue]) -> String {
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}
