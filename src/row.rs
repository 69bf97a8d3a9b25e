//! Row model and per-row statuses.

use std::collections::HashMap;

use serde::Serialize;

use crate::templates::Stage;

/// Columns that must be present before row processing starts.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "client_name",
    "case_code",
    "case_manager_name",
    "to",
    "team_lead_email",
    "poc_name",
];

/// Optional columns; absent values coerce to `""`.
pub const OPTIONAL_COLUMNS: [&str; 2] = ["poc_display_name", "extra_cc"];

/// One case record: a string-keyed map of column name to cell value.
///
/// All values are strings; a missing column reads as the empty string,
/// never as null. Lookup is case-insensitive because the source sheets mix
/// header casings (`POC_name`, `POC_display_name`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Trimmed value of a column; `""` when absent.
    pub fn get(&self, column: &str) -> String {
        if let Some(v) = self.values.get(column) {
            return v.trim().to_string();
        }
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(column))
            .map(|(_, v)| v.trim().to_string())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// One rendered escalation stage, ready for the materializer.
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    pub stage: Stage,
    pub subject: String,
    pub body_html: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
}

/// Terminal outcome for one row, accumulated into the status log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Ok { label: String },
    Skipped { reason: String },
    Failed { error: String },
}

impl RowStatus {
    /// User-facing status line for a 1-based row number.
    pub fn line(&self, row: usize) -> String {
        match self {
            RowStatus::Ok { label } => format!("Row {row}: OK – {label}"),
            RowStatus::Skipped { reason } => format!("Row {row}: SKIPPED – {reason}"),
            RowStatus::Failed { error } => format!("Row {row}: FAILED – {error}"),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RowStatus::Ok { .. })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
