use crate::db::{count_rows, get_connection};
use crate::error::Result;
use crate::schema::TargetTable;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("ledgerload.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        println!();
        for table in TargetTable::all() {
            let rows = count_rows(&conn, *table)?;
            println!("{:<36} {rows}", table.name());
        }
        let groupings: i64 = conn.query_row("SELECT count(*) FROM grouping", [], |r| r.get(0))?;
        println!("{:<36} {groupings}", "grouping");
    } else {
        println!();
        println!("Database not found. Run `ledgerload init` to set up.");
    }

    Ok(())
}
