// Standalone check for one date column of one sheet file: lists every
// non-empty cell that does not normalize into a calendar date. Run it
// before trusting a new sheet layout.
//
//   cargo run --bin validate_dates -- <sheet.csv> <column (1-based)> [start-row]

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use prazoscan::{date, source};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("usage: validate_dates <sheet.csv> <column (1-based)> [start-row]");
    }
    let path = &args[1];
    let column: usize = args[2]
        .parse()
        .with_context(|| format!("column must be a number, got '{}'", args[2]))?;
    if column == 0 {
        bail!("column is 1-based; 0 is not a valid column");
    }
    let start_row: usize = match args.get(3) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("start-row must be a number, got '{}'", raw))?,
        None => 2,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut checked = 0usize;
    let mut problems = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        if row < start_row {
            continue;
        }
        let record = record.with_context(|| format!("CSV parse error at row {}", row))?;
        let cell = source::type_cell(record.get(column - 1).unwrap_or(""));
        if cell.is_empty() {
            continue;
        }
        checked += 1;
        if date::normalize(&cell).is_none() {
            problems.push((row, cell.as_text()));
        }
    }

    if problems.is_empty() {
        println!(
            "all {} non-empty cells in column {} are valid dates",
            checked, column
        );
        return Ok(());
    }

    println!(
        "{} of {} non-empty cells in column {} did not parse:",
        problems.len(),
        checked,
        column
    );
    for (row, value) in &problems {
        println!("  row {:>5}: {}", row, value);
    }
    bail!("{} invalid date cells found", problems.len());
}
