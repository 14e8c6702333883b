// src/scan/mod.rs

pub mod thresholds;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::RecordShapeSpec;
use crate::date;
use crate::model::{AlertEvent, CellValue, InvalidDateObservation, ScanOutcome};
use thresholds::AlertDaysSet;

/// Scan `records` against a shape spec and emit one AlertEvent per
/// (record, monitored field) pair whose day-offset from `today` is in
/// `alert_days`.
///
/// `today` is injected by the caller; the scan never consults a clock, so
/// identical inputs always yield an identical outcome. Events come out in
/// record order and, within a record, in declared field order — that is the
/// only ordering contract.
pub fn scan(
    records: &[Vec<CellValue>],
    shape: &RecordShapeSpec,
    alert_days: &AlertDaysSet,
    today: NaiveDate,
) -> ScanOutcome {
    let mut events = Vec::new();
    let mut invalid_dates = Vec::new();
    let mut rows_scanned = 0;

    let first = shape.start_row.saturating_sub(1);
    for (idx, record) in records.iter().enumerate().skip(first) {
        rows_scanned += 1;

        // A blank identity cell means the row is not a record at all: no
        // events and no diagnostics, whatever its other cells hold.
        if let Some(col) = shape.id_column {
            if cell_at(record, col).as_text().is_empty() {
                debug!(row = idx + 1, "blank identity cell; row skipped");
                continue;
            }
        }

        for field in &shape.date_fields {
            let raw = cell_at(record, field.source_column);
            let Some(resolved) = date::normalize(raw) else {
                // Only a non-empty cell that failed to parse is worth
                // reporting; a genuinely empty cell is silence, not noise.
                if !raw.is_empty() {
                    invalid_dates.push(InvalidDateObservation {
                        row: idx + 1,
                        column: field.source_column + 1,
                        value: raw.as_text(),
                    });
                }
                continue;
            };

            // Completed items suppress the field before any threshold math.
            if let Some(check) = &field.completion_check {
                let marker = cell_at(record, check.marker_column).as_text();
                if marker.trim().to_uppercase() == check.marker_value.trim().to_uppercase() {
                    continue;
                }
            }

            let offset = thresholds::days_between(resolved, today);
            if alert_days.matches(offset) {
                events.push(AlertEvent {
                    id: extract(record, shape.id_column),
                    description: extract(record, shape.description_column),
                    action: extract(record, shape.action_column),
                    responsible: extract(record, shape.responsible_column),
                    field_name: field.name.clone(),
                    resolved_date: resolved,
                    days_remaining: offset,
                });
            }
        }
    }

    ScanOutcome {
        events,
        invalid_dates,
        rows_scanned,
    }
}

/// Rows may be ragged; reading past the end is an empty cell, not an error.
fn cell_at(record: &[CellValue], index: usize) -> &CellValue {
    record.get(index).unwrap_or(&CellValue::EMPTY)
}

fn extract(record: &[CellValue], column: Option<usize>) -> Option<String> {
    column.map(|c| cell_at(record, c).as_text())
}
