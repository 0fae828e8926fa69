//! Grouping definitions: named JSON trees describing chart-of-accounts
//! style groupings, stored whole and enumerated by leaf.

use rusqlite::Connection;
use serde_json::Value as Json;

use crate::error::{LedgerloadError, Result};

#[derive(Debug, Clone)]
pub struct Grouping {
    pub id: i64,
    pub name: String,
    pub definition: Json,
}

pub fn add_grouping(conn: &Connection, name: &str, definition: &Json) -> Result<i64> {
    conn.execute(
        "INSERT INTO grouping (name, definition) VALUES (?1, ?2)",
        rusqlite::params![name, serde_json::to_string(definition)?],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_groupings(conn: &Connection) -> Result<Vec<(i64, String)>> {
    let mut stmt =
        conn.prepare("SELECT id, name FROM grouping ORDER BY created_at DESC, id DESC")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_grouping(conn: &Connection, name: &str) -> Result<Grouping> {
    let (id, name, raw): (i64, String, String) = conn
        .query_row(
            "SELECT id, name, definition FROM grouping WHERE name = ?1",
            [name],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                LedgerloadError::UnknownGrouping(name.to_string())
            }
            other => other.into(),
        })?;
    let definition = serde_json::from_str(&raw)?;
    Ok(Grouping {
        id,
        name,
        definition,
    })
}

/// Every scalar reachable in the tree, depth-first. Objects recurse into
/// their values, arrays into their items.
pub fn leaf_nodes(tree: &Json) -> Vec<Json> {
    let mut leaves = Vec::new();
    collect_leaves(tree, &mut leaves);
    leaves
}

fn collect_leaves(node: &Json, leaves: &mut Vec<Json>) {
    match node {
        Json::Object(map) => {
            for value in map.values() {
                collect_leaves(value, leaves);
            }
        }
        Json::Array(items) => {
            for item in items {
                collect_leaves(item, leaves);
            }
        }
        _ => leaves.push(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use serde_json::json;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_add_and_get_grouping() {
        let (_dir, conn) = test_db();
        let tree = json!({"assets": {"current": ["1000", "1100"]}});
        let id = add_grouping(&conn, "balance_sheet", &tree).unwrap();
        assert!(id > 0);
        let loaded = get_grouping(&conn, "balance_sheet").unwrap();
        assert_eq!(loaded.definition, tree);
    }

    #[test]
    fn test_get_unknown_grouping_fails() {
        let (_dir, conn) = test_db();
        let err = get_grouping(&conn, "nope").unwrap_err();
        assert!(err.to_string().contains("Unknown grouping: nope"));
    }

    #[test]
    fn test_database_failures_are_not_reported_as_unknown() {
        // No init_db: the grouping table does not exist, which is a real
        // database error, not a missing grouping.
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        let err = get_grouping(&conn, "balance_sheet").unwrap_err();
        assert!(matches!(err, LedgerloadError::Db(_)), "got {err:?}");
        assert!(!err.to_string().contains("Unknown grouping"));
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, conn) = test_db();
        add_grouping(&conn, "first", &json!(["a"])).unwrap();
        add_grouping(&conn, "second", &json!(["b"])).unwrap();
        let names: Vec<String> = list_groupings(&conn)
            .unwrap()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_leaf_nodes_nested() {
        let tree = json!({
            "assets": {
                "current": ["1000", "1100"],
                "fixed": "1500"
            },
            "liabilities": ["2000"]
        });
        let leaves = leaf_nodes(&tree);
        assert_eq!(
            leaves,
            vec![json!("1000"), json!("1100"), json!("1500"), json!("2000")]
        );
    }

    #[test]
    fn test_leaf_nodes_scalar_is_its_own_leaf() {
        assert_eq!(leaf_nodes(&json!("1000")), vec![json!("1000")]);
        assert_eq!(leaf_nodes(&json!(42)), vec![json!(42)]);
    }
}
