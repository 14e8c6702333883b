// src/source/mod.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

use crate::model::CellValue;

/// One named sheet of typed cells, in source row order (headers included —
/// the shape spec's `start_row` decides where data begins, not the source).
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row. CSV rows may be ragged, so this is the
    /// bound that column references are validated against.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A directory of `<sheet>.csv` files standing in for a spreadsheet
/// workbook. Lookup by sheet name returns `Option`: not-found is an
/// ordinary branch for the caller, not an exception.
#[derive(Debug)]
pub struct CsvWorkbook {
    sheets: BTreeMap<String, Sheet>,
}

impl CsvWorkbook {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut sheets = BTreeMap::new();

        let entries =
            fs::read_dir(dir).with_context(|| format!("reading data dir {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let sheet = load_sheet(&path, &name)?;
            debug!(sheet = %name, rows = sheet.row_count(), "loaded sheet");
            sheets.insert(name, sheet);
        }

        Ok(Self { sheets })
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

fn load_sheet(path: &Path, name: &str) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening sheet file {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("CSV parse error in {} at row {}", name, idx + 1))?;
        rows.push(record.iter().map(type_cell).collect());
    }

    Ok(Sheet {
        name: name.to_string(),
        rows,
    })
}

/// Type a raw CSV field the way a spreadsheet hands values over: blank is
/// absence, a number is a number (a date column holding one is a serial
/// day-count), everything else stays text.
pub fn type_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    // "16/01/2024" has no f64 reading, so date text is never swallowed here
    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Numeric(n);
    }
    CellValue::Text(raw.to_string())
}
