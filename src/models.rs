use chrono::NaiveDate;
use rusqlite::types::{ToSql, ToSqlOutput};
use serde::Serialize;

/// A single typed cell. CSV parsing reads every cell as text; the pipeline's
/// type coercer promotes cells to dates and numbers, or to the explicit
/// absence marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    /// Truthiness used by the dimension folder: null, empty text and zero
    /// all count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Text(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0,
            Value::Date(_) => true,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(n) => write!(f, "{n:.2}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Text(s) => {
                ToSqlOutput::Borrowed(rusqlite::types::ValueRef::Text(s.as_bytes()))
            }
            Value::Number(n) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*n)),
            Value::Date(d) => ToSqlOutput::Owned(rusqlite::types::Value::Text(
                d.format("%Y-%m-%d").to_string(),
            )),
        })
    }
}

/// A parsed CSV upload: the header row plus all data rows, every cell as
/// text. No type inference happens at parse time.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One cleaned row: ordered (column, value) pairs ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub cells: Vec<(String, Value)>,
}

impl CleanRecord {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> Vec<&str> {
        self.cells.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// One reporting-attribute-dimension tag folded out of a sparse RAD column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadAttribute {
    pub rad_type_id: String,
    pub rad_id: serde_json::Value,
}
