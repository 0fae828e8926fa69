use std::io::Write;
use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::{self, get_connection};
use crate::error::Result;
use crate::fmt::{count, money};
use crate::models::{CleanRecord, RawTable, Value};
use crate::pipeline::clean_rows;
use crate::reader::read_csv;
use crate::schema::{TargetTable, AMOUNT_COLUMN};
use crate::settings::db_path;

const PREVIEW_ROWS: usize = 5;

pub fn run(file: &str, table: &str, yes: bool, dry_run: bool) -> Result<()> {
    let table: TargetTable = table.parse()?;
    let raw = read_csv(Path::new(file))?;

    println!("{}", "Raw uploaded data".bold());
    print_raw_head(&raw);

    let clean = clean_rows(table, &raw)?;

    println!("{}", "Cleaned data".bold());
    print_clean_head(&clean);

    let net: f64 = clean
        .iter()
        .filter_map(|r| match r.get(AMOUNT_COLUMN) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        })
        .sum();
    println!(
        "{} cleaned, net amount {}",
        count(clean.len(), "row"),
        money(net)
    );

    if dry_run {
        return Ok(());
    }

    if !yes && !confirm(table)? {
        println!("Upload cancelled.");
        return Ok(());
    }

    let conn = get_connection(&db_path())?;
    let dropped = db::delete_from_minimum_date(&conn, table, &clean)?;
    println!("{}", format!("{} dropped from {table}", count(dropped, "row")).yellow());
    let inserted = db::insert_rows(&conn, table, &clean)?;
    println!(
        "{}",
        format!("{} inserted into {table}", count(inserted, "row")).green()
    );

    println!("{}", "Database head".bold());
    let head = db::head(&conn, table, PREVIEW_ROWS)?;
    let mut grid = Table::new();
    grid.set_header(head.columns);
    for row in head.rows {
        grid.add_row(row);
    }
    println!("{grid}");

    Ok(())
}

fn confirm(table: TargetTable) -> Result<bool> {
    print!(
        "Ingest into {table}? This drops staged rows on or after the upload's \
         earliest accounting date. [y/N] "
    );
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes"))
}

fn print_raw_head(raw: &RawTable) {
    let mut grid = Table::new();
    grid.set_header(raw.headers.clone());
    for row in raw.rows.iter().take(PREVIEW_ROWS) {
        grid.add_row(row.clone());
    }
    println!("{grid}");
}

fn print_clean_head(records: &[CleanRecord]) {
    let mut grid = Table::new();
    if let Some(first) = records.first() {
        grid.set_header(first.columns());
    }
    for record in records.iter().take(PREVIEW_ROWS) {
        grid.add_row(
            record
                .cells
                .iter()
                .map(|(_, value)| Cell::new(value))
                .collect::<Vec<_>>(),
        );
    }
    println!("{grid}");
}
