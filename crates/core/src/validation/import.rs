//! Bulk import validation and dry-run preview.
//!
//! Rows are checked independently against a required-column contract. No
//! cross-row checks (duplicates, uniqueness) are made here.

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use super::rules::ValidationResult;

/// One parsed spreadsheet/CSV row, keyed by column header.
pub type ImportRow = serde_json::Map<String, Value>;

/// Required columns for a customer import.
pub const CUSTOMER_IMPORT_COLUMNS: &[&str] = &["full_name", "branch_id"];

/// Sole error reported for an empty row set.
pub const NO_DATA_MESSAGE: &str = "No data to validate";

/// Normalize a loosely typed `rows` payload.
///
/// Anything other than an array yields no rows, and a non-object element
/// becomes a row with no cells, so malformed uploads surface as ordinary
/// validation errors.
pub fn rows_from_json(rows: Option<Value>) -> Vec<ImportRow> {
    match rows {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => row,
                _ => ImportRow::new(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Validate an import row set.
///
/// An empty set fails with [`NO_DATA_MESSAGE`] alone. Otherwise the first
/// row's keys are checked for missing columns (one aggregate error), and
/// every cell of every required column is checked in every row. A column
/// missing everywhere therefore yields the aggregate error plus one error
/// per row.
pub fn validate_import_data<S: AsRef<str>>(
    rows: &[ImportRow],
    required_columns: &[S],
) -> ValidationResult {
    let Some(first) = rows.first() else {
        return ValidationResult::from_errors(vec![NO_DATA_MESSAGE.to_string()]);
    };

    let mut errors = Vec::new();

    let missing: Vec<&str> = required_columns
        .iter()
        .map(|column| column.as_ref())
        .filter(|column| !first.contains_key(*column))
        .collect();
    if !missing.is_empty() {
        errors.push(format!("Missing required columns: {}", missing.join(", ")));
    }

    for (index, row) in rows.iter().enumerate() {
        errors.extend(row_errors(index + 1, row, required_columns));
    }

    ValidationResult::from_errors(errors)
}

/// A row that failed validation, with its 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RowRejection {
    pub row: usize,
    pub errors: Vec<String>,
}

/// Dry-run outcome of an import: which rows would be accepted and which
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ImportPreview {
    pub total_rows: usize,
    /// 1-based row numbers that passed.
    pub accepted: Vec<usize>,
    pub rejected: Vec<RowRejection>,
}

impl ImportPreview {
    /// Create an empty preview for a given row count.
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Record the outcome for one row.
    pub fn push(&mut self, row: usize, errors: Vec<String>) {
        if errors.is_empty() {
            self.accepted.push(row);
        } else {
            self.rejected.push(RowRejection { row, errors });
        }
    }

    /// True when every row would be imported.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Split an import into accepted and rejected rows using the per-cell rule
/// of [`validate_import_data`].
pub fn preview_import<S: AsRef<str>>(rows: &[ImportRow], required_columns: &[S]) -> ImportPreview {
    let mut preview = ImportPreview::new(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        preview.push(row_number, row_errors(row_number, row, required_columns));
    }
    preview
}

fn row_errors<S: AsRef<str>>(row_number: usize, row: &ImportRow, required_columns: &[S]) -> Vec<String> {
    required_columns
        .iter()
        .map(|column| column.as_ref())
        .filter(|column| is_missing_cell(row.get(*column)))
        .map(|column| format!("Row {row_number}: {column} is required"))
        .collect()
}

/// Absent, null and `""` count as missing. Whitespace does not.
fn is_missing_cell(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}
