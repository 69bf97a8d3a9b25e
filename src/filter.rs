//! Case repository filter — boolean masks over typed case columns.
//!
//! Shortlists active cases ready for data collection: no end date, start
//! date inside the selected range, DNC status allowing collection, and at
//! least one target function tag present.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FilterError;
use crate::row::Row;

/// Columns the case repository sheet must carry.
pub const FILTER_COLUMNS: [&str; 5] = [
    "Case Code",
    "Case Start Date",
    "Case End Date",
    "Applicable Functions",
    "System DNC Status",
];

/// Function tags that qualify a case for data collection.
pub const TARGET_FUNCTIONS: [&str; 4] = [
    "Engineering Research and Development",
    "Procurement",
    "Supply Chain",
    "Manufacturing",
];

/// DNC status value that allows collection.
pub const ALLOW_STATUS: &str = "Allow Data Collection";

/// Verify the filter's required columns are present.
pub fn check_filter_columns<S: AsRef<str>>(headers: &[S]) -> Result<(), FilterError> {
    let missing: Vec<&str> = FILTER_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h.as_ref().eq_ignore_ascii_case(c)))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FilterError::MissingColumns {
            columns: missing.join(", "),
        })
    }
}

/// One case repository record with its date columns parsed.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub case_code: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub functions: String,
    pub dnc_status: String,
}

impl CaseRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            case_code: row.get("Case Code"),
            start_date: parse_date(&row.get("Case Start Date")),
            end_date: parse_date(&row.get("Case End Date")),
            functions: row.get("Applicable Functions"),
            dnc_status: row.get("System DNC Status"),
        }
    }
}

/// Parse a spreadsheet date cell, permissively.
///
/// Tries the formats the repository sheets actually contain; anything
/// unparseable coerces to `None` rather than erroring.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    const FORMATS: [&str; 7] = [
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%b-%Y",
        "%d %b %Y",
        "%Y/%m/%d",
        "%m/%d/%y",
    ];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    // Datetime-bearing cells: retry on the part before the time component.
    if let Some(date_part) = value.split_whitespace().next()
        && date_part != value
    {
        return parse_date(date_part);
    }
    None
}

/// The selected filters; all four masks must hold for a record to pass.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub target_functions: Vec<String>,
    pub allowed_status: String,
}

impl FilterCriteria {
    /// Criteria over a start-date range, with the default function tags
    /// and DNC status.
    pub fn new(range_start: NaiveDate, range_end: NaiveDate) -> Result<Self, FilterError> {
        if range_start > range_end {
            return Err(FilterError::InvalidRange {
                start: range_start,
                end: range_end,
            });
        }
        Ok(Self {
            range_start,
            range_end,
            target_functions: TARGET_FUNCTIONS.iter().map(|s| s.to_string()).collect(),
            allowed_status: ALLOW_STATUS.to_string(),
        })
    }

    fn matches(&self, record: &CaseRecord) -> bool {
        let active = record.end_date.is_none();
        let in_range = record
            .start_date
            .is_some_and(|d| d >= self.range_start && d <= self.range_end);
        let status_ok = record.dnc_status.trim() == self.allowed_status;
        let functions = record.functions.to_lowercase();
        let function_ok = self
            .target_functions
            .iter()
            .any(|f| functions.contains(&f.to_lowercase()));
        active && in_range && status_ok && function_ok
    }
}

/// Apply all masks, preserving input order.
pub fn shortlist(records: &[CaseRecord], criteria: &FilterCriteria) -> Vec<CaseRecord> {
    let kept: Vec<CaseRecord> = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();
    tracing::info!(matched = kept.len(), total = records.len(), "shortlisted cases");
    kept
}

// ── Tests ───────────────────────────────────────────────────────────
