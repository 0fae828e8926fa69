use std::path::Path;

use colored::Colorize;
use comfy_table::Table;

use crate::error::Result;
use crate::pipeline::normalize_columns;
use crate::reader::read_csv;

const PREVIEW_ROWS: usize = 5;

/// Canonical column names a trial balance export is expected to carry.
const EXPECTED_COLUMNS: &[&str] = &["account", "description", "debit", "credit"];

/// Preview a trial balance CSV and warn about missing expected columns.
/// Unlike `upload`, this never touches the database; it is a quick sanity
/// check on a file before it goes anywhere.
pub fn run(file: &str) -> Result<()> {
    let raw = read_csv(Path::new(file))?;

    println!("{}", "Trial balance preview".bold());
    let mut grid = Table::new();
    grid.set_header(raw.headers.clone());
    for row in raw.rows.iter().take(PREVIEW_ROWS) {
        grid.add_row(row.clone());
    }
    println!("{grid}");

    let present = normalize_columns(&raw.headers);
    let missing: Vec<&str> = EXPECTED_COLUMNS
        .iter()
        .filter(|col| !present.iter().any(|p| p == *col))
        .copied()
        .collect();

    if missing.is_empty() {
        println!(
            "{}",
            format!("All expected columns present ({} rows)", raw.rows.len()).green()
        );
    } else {
        println!(
            "{}",
            format!("Missing expected columns: {}", missing.join(", ")).yellow()
        );
    }

    Ok(())
}
