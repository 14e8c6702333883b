// src/date/mod.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::CellValue;

/// Spreadsheet serial day 25569 is 1970-01-01, i.e. serial day 0 is
/// 1899-12-30 in the proleptic Gregorian calendar.
const UNIX_EPOCH_SERIAL_DAY: f64 = 25569.0;
const MILLIS_PER_DAY: i64 = 86_400_000;

static YEAR_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").expect("year-first pattern"));
static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{4})$").expect("day-first pattern"));

/// Formats tried by the free-form fallback, date-only then date-time.
const FREE_FORM_DATES: &[&str] = &["%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y", "%Y%m%d"];
const FREE_FORM_DATETIMES: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Normalize an arbitrary cell into a calendar date, or `None` when the cell
/// is empty or holds no date interpretation. Never errors: the caller
/// decides whether an un-normalizable non-empty cell is worth reporting.
///
/// `Numeric(0.0)` is a real date (serial day 0), not an empty cell — only
/// absence counts as empty.
pub fn normalize(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Empty => None,
        CellValue::Temporal(dt) => Some(dt.date()),
        CellValue::Numeric(n) => serial_to_date(*n),
        CellValue::Text(s) => parse_text(s.trim()),
    }
}

/// Convert a spreadsheet serial day-count to its calendar day. Fractional
/// serials carry a time-of-day which is discarded after rounding to millis.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - UNIX_EPOCH_SERIAL_DAY) * MILLIS_PER_DAY as f64).round();
    if millis >= i64::MAX as f64 || millis <= i64::MIN as f64 {
        return None;
    }
    let days = (millis as i64).div_euclid(MILLIS_PER_DAY);
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .expect("unix epoch is a valid date")
        .checked_add_signed(Duration::days(days))
}

/// Parse a textual date. Strict patterns are tried first, in a fixed order:
/// year-first (`YYYY-M-D`, unambiguous), then day-first (`D/M/YYYY` — the
/// deliberate reading for ambiguous two-number prefixes; the sheets this
/// tool targets are DD/MM), then a free-form fallback. Once a strict
/// pattern structurally matches there is no fallback: "31/02/2024" is
/// unparseable, not a candidate for some other reading.
fn parse_text(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Some(caps) = YEAR_FIRST.captures(s) {
        return date_from_parts(&caps[1], &caps[2], &caps[3]);
    }
    if let Some(caps) = DAY_FIRST.captures(s) {
        return date_from_parts(&caps[3], &caps[2], &caps[1]);
    }
    parse_free_form(s)
}

fn date_from_parts(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn parse_free_form(s: &str) -> Option<NaiveDate> {
    for fmt in FREE_FORM_DATES {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in FREE_FORM_DATETIMES {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}
