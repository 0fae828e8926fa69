use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::grouping::{add_grouping, get_grouping, leaf_nodes, list_groupings};
use crate::settings::db_path;

pub fn add(name: &str, file: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let definition: serde_json::Value = serde_json::from_str(&content)?;
    let conn = get_connection(&db_path())?;
    let id = add_grouping(&conn, name, &definition)?;
    println!("Created grouping '{name}' with ID {id}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let groupings = list_groupings(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for (id, name) in groupings {
        table.add_row(vec![Cell::new(id), Cell::new(name)]);
    }
    println!("Groupings\n{table}");
    Ok(())
}

pub fn show_leaves(name: &str) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let grouping = get_grouping(&conn, name)?;
    let leaves = leaf_nodes(&grouping.definition);

    println!("Leaves of '{}':", grouping.name);
    for leaf in leaves {
        match leaf {
            serde_json::Value::String(s) => println!("  {s}"),
            other => println!("  {other}"),
        }
    }
    Ok(())
}
