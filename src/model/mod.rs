// src/model/mod.rs

use chrono::{NaiveDate, NaiveDateTime};

/// One cell as handed over by a data source. Sources hand us dates as real
/// temporal values, as spreadsheet serial numbers, or as text, so the shape
/// is resolved into this union once at the boundary instead of probing types
/// everywhere downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Temporal(NaiveDateTime),
    Numeric(f64),
    Text(String),
}

impl CellValue {
    pub const EMPTY: CellValue = CellValue::Empty;

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Render the cell for identity/marker columns and diagnostics.
    /// Numeric cells print the way the source displayed them (no forced
    /// decimals: 42.0 → "42", 1.5 → "1.5").
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Temporal(dt) => dt.format("%d/%m/%Y").to_string(),
            CellValue::Numeric(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }
}

/// One qualifying (record, monitored field) pair. Produced once during a
/// scan and never mutated or merged afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub id: Option<String>,
    pub description: Option<String>,
    pub action: Option<String>,
    pub responsible: Option<String>,
    /// Label of the monitored date field, as configured.
    pub field_name: String,
    pub resolved_date: NaiveDate,
    /// Whole calendar days until the date; negative means already overdue.
    pub days_remaining: i64,
}

/// A non-empty cell that could not be normalized into a date. Collected for
/// operator visibility only; never aborts a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidDateObservation {
    /// 1-based row in the original source.
    pub row: usize,
    /// 1-based column in the original source.
    pub column: usize,
    pub value: String,
}

/// Everything one scan produced, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub events: Vec<AlertEvent>,
    pub invalid_dates: Vec<InvalidDateObservation>,
    pub rows_scanned: usize,
}
