//! Tabular input adapters — CSV and XLSX files to string-keyed rows.
//!
//! Every cell is read as a string; empty and absent cells both coerce to
//! `""`. Column presence is checked here, before row processing starts —
//! the processor assumes the required columns exist.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use csv::{ReaderBuilder, Trim};

use crate::error::InputError;
use crate::row::{REQUIRED_COLUMNS, Row};

/// A loaded sheet: header names in file order plus one [`Row`] per record.
#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Verify the generator's required columns are all present.
pub fn check_required_columns<S: AsRef<str>>(headers: &[S]) -> Result<(), InputError> {
    check_columns(headers, &REQUIRED_COLUMNS)
}

/// Verify an arbitrary required-column set, case-insensitively.
pub fn check_columns<S: AsRef<str>>(headers: &[S], required: &[&str]) -> Result<(), InputError> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|c| !headers.iter().any(|h| h.as_ref().eq_ignore_ascii_case(c)))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingColumns {
            columns: missing.join(", "),
        })
    }
}

/// Load a table from a file, dispatching on extension (`.csv` / `.xlsx`).
pub fn load_table(path: &Path) -> Result<Table, InputError> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("csv") => load_csv(path),
        Some("xlsx") => load_xlsx(path),
        _ => Err(InputError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// Load a CSV file; the first record is the header row.
pub fn load_csv(path: &Path) -> Result<Table, InputError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), record.get(i).unwrap_or(""));
        }
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), "loaded csv table");
    Ok(Table { headers, rows })
}

/// Load the first worksheet of an XLSX file; the first row is the header.
pub fn load_xlsx(path: &Path) -> Result<Table, InputError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| InputError::Workbook(format!("failed to open workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InputError::Workbook("no worksheet found".to_string()))?
        .map_err(|e| InputError::Workbook(format!("failed to read worksheet: {e}")))?;

    let mut sheet_rows = range.rows();
    let Some(header_cells) = sheet_rows.next() else {
        return Ok(Table::default());
    };
    let headers: Vec<String> = header_cells.iter().map(cell_to_string).collect();

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            let value = cells.get(i).map(cell_to_string).unwrap_or_default();
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }
    tracing::debug!(rows = rows.len(), "loaded xlsx table");
    Ok(Table { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────
