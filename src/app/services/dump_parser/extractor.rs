//! Statement discovery for one legacy table
//!
//! Finds every `INSERT INTO <table> (<columns>) VALUES (...)[, (...)];`
//! statement and returns its value groups in file order. The table name is
//! matched case-sensitively and may be wrapped in backticks. Value groups are
//! delimited with a quote-aware scan, so `)` or `,` inside a quoted string do
//! not end a group. Escaped quotes (`\'` or `''`) stay inside their string.

use crate::{Error, Result};
use regex::Regex;
use tracing::{debug, warn};

/// One matched insert statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement<'a> {
    /// Column names from the statement header, backticks removed
    pub columns: Vec<String>,
    /// Inner text of each parenthesized value group
    pub tuples: Vec<&'a str>,
    /// 1-based line of the `INSERT INTO` keyword
    pub line: usize,
}

/// Statements found for one table, plus the lines of those that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementScan<'a> {
    pub statements: Vec<InsertStatement<'a>>,
    /// 1-based lines of malformed statements whose rows were not read
    pub skipped_lines: Vec<usize>,
}

impl StatementScan<'_> {
    pub fn skipped(&self) -> usize {
        self.skipped_lines.len()
    }
}

/// Scans a loaded dump for the statements of individual tables
#[derive(Debug, Clone, Copy)]
pub struct StatementExtractor<'a> {
    dump: &'a str,
}

impl<'a> StatementExtractor<'a> {
    pub fn new(dump: &'a str) -> Self {
        Self { dump }
    }

    /// Every insert statement header for `table`, in file order
    ///
    /// A statement whose value list is not terminated by `;` is skipped with a
    /// warning and its line is recorded; scanning resumes after its header.
    pub fn scan(&self, table: &str) -> Result<StatementScan<'a>> {
        let header = header_pattern(table)?;
        let mut scan = StatementScan::default();
        let mut position = 0;
        let mut line = 1;
        let mut counted_to = 0;

        while let Some(captures) = header.captures_at(self.dump, position) {
            let (Some(whole), Some(column_list)) = (captures.get(0), captures.get(1)) else {
                break;
            };
            // Match starts only move forward, so newlines are counted once
            line += self.dump[counted_to..whole.start()].matches('\n').count();
            counted_to = whole.start();

            match scan_value_groups(self.dump, whole.end()) {
                Some((tuples, end)) => {
                    debug!(
                        "Found {} value groups for '{}' at line {}",
                        tuples.len(),
                        table,
                        line
                    );
                    scan.statements.push(InsertStatement {
                        columns: parse_column_list(column_list.as_str()),
                        tuples,
                        line,
                    });
                    position = end;
                }
                None => {
                    warn!(
                        "Skipping malformed INSERT statement for '{}' at line {}",
                        table, line
                    );
                    scan.skipped_lines.push(line);
                    position = whole.end();
                }
            }
        }

        Ok(scan)
    }

    /// All well-formed insert statements for `table`, in file order
    pub fn statements(&self, table: &str) -> Result<Vec<InsertStatement<'a>>> {
        Ok(self.scan(table)?.statements)
    }

    /// Flattened value groups of every statement for `table`
    pub fn tuples(&self, table: &str) -> Result<Vec<&'a str>> {
        Ok(self
            .statements(table)?
            .into_iter()
            .flat_map(|statement| statement.tuples)
            .collect())
    }
}

fn header_pattern(table: &str) -> Result<Regex> {
    let pattern = format!(
        r"INSERT INTO\s+`?{}`?\s*\(([^)]*)\)\s*VALUES",
        regex::escape(table)
    );
    Regex::new(&pattern).map_err(|e| {
        Error::data_validation(format!(
            "Invalid statement pattern for table '{}': {}",
            table, e
        ))
    })
}

/// Split a header column list such as "`id`, `temperature`" into names
fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|column| column.trim().trim_matches('`').to_string())
        .filter(|column| !column.is_empty())
        .collect()
}

fn skip_whitespace(bytes: &[u8], mut position: usize) -> usize {
    while bytes.get(position).is_some_and(u8::is_ascii_whitespace) {
        position += 1;
    }
    position
}

/// Collect `(...)` groups separated by commas until the terminating `;`
///
/// Returns the group bodies and the offset just past the `;`, or None when
/// the list is not well formed.
fn scan_value_groups(text: &str, start: usize) -> Option<(Vec<&str>, usize)> {
    let bytes = text.as_bytes();
    let mut groups = Vec::new();
    let mut position = start;

    loop {
        position = skip_whitespace(bytes, position);
        if bytes.get(position) != Some(&b'(') {
            return None;
        }

        let open = position;
        let close = find_group_end(bytes, open)?;
        groups.push(&text[open + 1..close]);

        position = skip_whitespace(bytes, close + 1);
        match bytes.get(position) {
            Some(b',') => position += 1,
            Some(b';') => return Some((groups, position + 1)),
            _ => return None,
        }
    }
}

/// Offset of the `)` matching the `(` at `open`, ignoring quoted text
///
/// Inside quotes a backslash escapes the next byte and `''` is a literal
/// quote, so neither ends the quoted span.
fn find_group_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut position = open;

    while let Some(&byte) = bytes.get(position) {
        if in_quote {
            match byte {
                b'\\' => position += 1,
                b'\'' if bytes.get(position + 1) == Some(&b'\'') => position += 1,
                b'\'' => in_quote = false,
                _ => {}
            }
        } else {
            match byte {
                b'\'' => in_quote = true,
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(position);
                    }
                }
                _ => {}
            }
        }
        position += 1;
    }

    None
}
