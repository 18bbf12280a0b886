//! The row codec: converts table grids to typed records and back.
//!
//! Columns are matched by position against the registry's declared headers;
//! the first grid row is the stored header row and is skipped. Coercion is
//! driven by the [`ColumnKind`](credence_registry::ColumnKind) classified at
//! registry build time:
//!
//! - JSON columns: a non-empty string cell is parsed; a parse failure is
//!   recorded as a [`DecodeIssue`] and the value becomes `{}`. Reads never
//!   fail on malformed data.
//! - Boolean columns: textual `"true"` or native `true` → `true`,
//!   everything else → `false`.
//! - Text columns pass through unchanged.
//!
//! Round-trip law: `decode(encode(R, H), H) == R` for any record set whose
//! fields are exactly the derived keys of `H`, with booleans held as JSON
//! booleans and JSON-column values held as structured values.

use credence_registry::{ColumnKind, Header};
use credence_store::{Grid, Row, HEADER_ROW};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// A decoded row: derived header key → coerced value.
pub type Record = Map<String, Value>;

/// One non-fatal decode problem, reported instead of propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeIssue {
    /// 1-based row position in the grid (header row is 1).
    pub row: usize,
    /// Stored label of the offending column.
    pub column: String,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {:?}: {}", self.row, self.column, self.message)
    }
}

/// Decodes every data row of a grid, collecting issues alongside.
#[must_use]
pub fn decode(grid: &Grid, headers: &[Header]) -> (Vec<Record>, Vec<DecodeIssue>) {
    let mut records = Vec::with_capacity(grid.len().saturating_sub(1));
    let mut issues = Vec::new();
    for (i, row) in grid.iter().skip(HEADER_ROW).enumerate() {
        records.push(decode_row(row, headers, i + HEADER_ROW + 1, &mut issues));
    }
    (records, issues)
}

/// Decodes a grid, logging each issue at warn level instead of returning it.
#[must_use]
pub fn decode_logged(grid: &Grid, headers: &[Header]) -> Vec<Record> {
    let (records, issues) = decode(grid, headers);
    for issue in &issues {
        warn!(row = issue.row, column = %issue.column, "decode issue: {}", issue.message);
    }
    records
}

/// Decodes one data row at the given 1-based grid position.
pub fn decode_row(
    row: &Row,
    headers: &[Header],
    position: usize,
    issues: &mut Vec<DecodeIssue>,
) -> Record {
    let mut record = Record::new();
    for (col, header) in headers.iter().enumerate() {
        let cell = row.get(col).cloned().unwrap_or(Value::String(String::new()));
        let value = match header.kind {
            ColumnKind::Json => decode_json_cell(cell, header, position, issues),
            ColumnKind::Boolean => Value::Bool(is_truthy(&cell)),
            ColumnKind::Text => cell,
        };
        record.insert(header.key.clone(), value);
    }
    record
}

/// Encodes records into a grid whose first row is the stored header labels.
/// Column order is exactly `headers`; missing fields become empty strings.
#[must_use]
pub fn encode(records: &[Record], headers: &[Header]) -> Grid {
    let mut grid = Vec::with_capacity(records.len() + 1);
    grid.push(header_row(headers));
    for record in records {
        grid.push(encode_row(record, headers));
    }
    grid
}

/// Encodes a single record into a data row.
#[must_use]
pub fn encode_row(record: &Record, headers: &[Header]) -> Row {
    headers
        .iter()
        .map(|header| match record.get(&header.key) {
            Some(value) => encode_cell(value, header.kind),
            None => Value::String(String::new()),
        })
        .collect()
}

/// The stored header row for a header list.
#[must_use]
pub fn header_row(headers: &[Header]) -> Row {
    headers
        .iter()
        .map(|h| Value::String(h.label.clone()))
        .collect()
}

/// Encodes one field value for its column kind. JSON-column values that are
/// still structured are serialized; everything else passes through.
#[must_use]
pub fn encode_cell(value: &Value, kind: ColumnKind) -> Value {
    match kind {
        ColumnKind::Json if value.is_object() || value.is_array() => {
            // Compact form; serializing a Value cannot fail.
            Value::String(value.to_string())
        }
        _ => value.clone(),
    }
}

fn decode_json_cell(
    cell: Value,
    header: &Header,
    position: usize,
    issues: &mut Vec<DecodeIssue>,
) -> Value {
    match cell {
        Value::String(s) if !s.is_empty() => match serde_json::from_str(&s) {
            Ok(parsed) => parsed,
            Err(e) => {
                issues.push(DecodeIssue {
                    row: position,
                    column: header.label.clone(),
                    message: format!("malformed JSON cell: {e}"),
                });
                Value::Object(Map::new())
            }
        },
        other => other,
    }
}

/// Boolean coercion: native `true` or the text `"true"` (any case) is true,
/// everything else is false.
#[must_use]
pub fn is_truthy(cell: &Value) -> bool {
    match cell {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
