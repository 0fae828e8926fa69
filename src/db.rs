use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{CleanRecord, Value};
use crate::schema::{TargetTable, ACCOUNTING_DATE_COLUMN};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS manual_journal_entry_transaction (
    id INTEGER PRIMARY KEY,
    entry_id TEXT,
    entry_detail_id TEXT,
    seqno TEXT,
    accounting_date TEXT,
    account TEXT,
    description TEXT,
    amount REAL,
    rad_data TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS manual_budget (
    id INTEGER PRIMARY KEY,
    fiscal_year TEXT,
    accounting_date TEXT,
    account TEXT,
    description TEXT,
    amount REAL,
    rad_data TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS grouping (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    definition TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert one statement per cleaned record and report how many went in.
pub fn insert_rows(
    conn: &Connection,
    table: TargetTable,
    records: &[CleanRecord],
) -> Result<usize> {
    let mut inserted = 0usize;
    for record in records {
        let columns: Vec<String> = record
            .cells
            .iter()
            .map(|(name, _)| format!("\"{name}\""))
            .collect();
        let placeholders: Vec<String> = (1..=record.cells.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns.join(", "),
            placeholders.join(", ")
        );
        conn.execute(
            &sql,
            rusqlite::params_from_iter(record.cells.iter().map(|(_, value)| value)),
        )?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Drop previously staged rows on or after the upload's earliest accounting
/// date, so a corrected re-upload replaces that window instead of
/// duplicating it. The returned count comes from this statement's execution,
/// not a connection-wide change counter.
pub fn delete_from_minimum_date(
    conn: &Connection,
    table: TargetTable,
    records: &[CleanRecord],
) -> Result<usize> {
    let min_date = records
        .iter()
        .filter_map(|r| match r.get(ACCOUNTING_DATE_COLUMN) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        })
        .min();

    let Some(min_date) = min_date else {
        return Ok(0);
    };

    let deleted = conn.execute(
        &format!(
            "DELETE FROM {} WHERE accounting_date >= ?1",
            table.name()
        ),
        [min_date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(deleted)
}

pub struct TableHead {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// First `limit` rows of a staging table, ordered by id, all cells rendered
/// as display text.
pub fn head(conn: &Connection, table: TargetTable, limit: usize) -> Result<TableHead> {
    let mut stmt = conn.prepare(&format!(
        "SELECT * FROM {} ORDER BY id LIMIT {limit}",
        table.name()
    ))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                let cell: rusqlite::types::Value = row.get(i)?;
                cells.push(match cell {
                    rusqlite::types::Value::Null => String::new(),
                    rusqlite::types::Value::Integer(v) => v.to_string(),
                    rusqlite::types::Value::Real(v) => format!("{v:.2}"),
                    rusqlite::types::Value::Text(v) => v,
                    rusqlite::types::Value::Blob(_) => "<blob>".to_string(),
                });
            }
            Ok(cells)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TableHead { columns, rows })
}

pub fn count_rows(conn: &Connection, table: TargetTable) -> Result<i64> {
    let count = conn.query_row(
        &format!("SELECT count(*) FROM {}", table.name()),
        [],
        |r| r.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTable;
    use crate::pipeline::clean_rows;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn budget_table(rows: &[(&str, &str)]) -> RawTable {
        RawTable {
            headers: ["Fiscal Year", "Accounting Date", "Account", "Description", "Amount"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|(date, amount)| {
                    vec![
                        "2024".to_string(),
                        date.to_string(),
                        "6000".to_string(),
                        "line".to_string(),
                        amount.to_string(),
                    ]
                })
                .collect(),
        }
    }

    fn clean_budget(rows: &[(&str, &str)]) -> Vec<CleanRecord> {
        clean_rows(TargetTable::ManualBudget, &budget_table(rows)).unwrap()
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &[
            "manual_journal_entry_transaction",
            "manual_budget",
            "grouping",
        ] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_insert_rows_reports_count() {
        let (_dir, conn) = test_db();
        let clean = clean_budget(&[("01/15/2024", "10.00"), ("01/16/2024", "20.00")]);
        let inserted = insert_rows(&conn, TargetTable::ManualBudget, &clean).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(count_rows(&conn, TargetTable::ManualBudget).unwrap(), 2);
    }

    #[test]
    fn test_insert_stores_typed_values() {
        let (_dir, conn) = test_db();
        let clean = clean_budget(&[("01/15/2024", "1,234.5")]);
        insert_rows(&conn, TargetTable::ManualBudget, &clean).unwrap();
        let (date, amount): (String, f64) = conn
            .query_row(
                "SELECT accounting_date, amount FROM manual_budget",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(date, "2024-01-15");
        assert_eq!(amount, 1234.50);
    }

    #[test]
    fn test_delete_from_minimum_date_windows_reupload() {
        let (_dir, conn) = test_db();
        let earlier = clean_budget(&[("01/10/2024", "1.00")]);
        let later = clean_budget(&[("02/01/2024", "2.00"), ("02/15/2024", "3.00")]);
        insert_rows(&conn, TargetTable::ManualBudget, &earlier).unwrap();
        insert_rows(&conn, TargetTable::ManualBudget, &later).unwrap();

        // Re-upload covering February: both February rows go, January stays.
        let reupload = clean_budget(&[("02/01/2024", "2.50")]);
        let deleted = delete_from_minimum_date(&conn, TargetTable::ManualBudget, &reupload).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(count_rows(&conn, TargetTable::ManualBudget).unwrap(), 1);
    }

    #[test]
    fn test_delete_with_no_dates_is_a_noop() {
        let (_dir, conn) = test_db();
        let clean = clean_budget(&[("01/10/2024", "1.00")]);
        insert_rows(&conn, TargetTable::ManualBudget, &clean).unwrap();
        let deleted = delete_from_minimum_date(&conn, TargetTable::ManualBudget, &[]).unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(count_rows(&conn, TargetTable::ManualBudget).unwrap(), 1);
    }

    #[test]
    fn test_head_returns_first_rows_in_id_order() {
        let (_dir, conn) = test_db();
        let clean = clean_budget(&[
            ("01/10/2024", "1.00"),
            ("01/11/2024", "2.00"),
            ("01/12/2024", "3.00"),
        ]);
        insert_rows(&conn, TargetTable::ManualBudget, &clean).unwrap();
        let head = head(&conn, TargetTable::ManualBudget, 2).unwrap();
        assert_eq!(head.rows.len(), 2);
        assert!(head.columns.contains(&"rad_data".to_string()));
        let date_idx = head.columns.iter().position(|c| c == "accounting_date").unwrap();
        assert_eq!(head.rows[0][date_idx], "2024-01-10");
    }

    #[test]
    fn test_null_rad_data_round_trips_as_sql_null() {
        let (_dir, conn) = test_db();
        let clean = clean_budget(&[("01/10/2024", "1.00")]);
        insert_rows(&conn, TargetTable::ManualBudget, &clean).unwrap();
        let rad: Option<String> = conn
            .query_row("SELECT rad_data FROM manual_budget", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rad, None);
    }
}
