use comfy_table::Table;

use crate::db::{self, get_connection};
use crate::error::Result;
use crate::schema::TargetTable;
use crate::settings::db_path;

pub fn run(table: &str, limit: usize) -> Result<()> {
    let table: TargetTable = table.parse()?;
    let conn = get_connection(&db_path())?;
    let head = db::head(&conn, table, limit)?;

    let mut grid = Table::new();
    grid.set_header(head.columns);
    for row in head.rows {
        grid.add_row(row);
    }
    println!("{table}\n{grid}");
    Ok(())
}
