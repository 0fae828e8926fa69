//! Row-cleaning pipeline for uploaded CSV exports.
//!
//! Stages run in strict order: header normalization, schema validation,
//! type coercion, then RAD column folding. The first failing stage aborts
//! the invocation and no partial record set escapes. The input table is
//! never mutated, so re-running on the same upload yields the same output.

use chrono::NaiveDate;

use crate::error::{LedgerloadError, Result};
use crate::models::{CleanRecord, RadAttribute, RawTable, Value};
use crate::schema::{ColumnType, TargetTable, AMOUNT_COLUMN, RAD_DATA_COLUMN};

/// Cell contents treated as an explicit null, compared case-insensitively
/// after trimming.
const NULL_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// RAD columns are matched case-insensitively on this substring; canonical
/// names are already lowercase, so the rule is uniform across components.
const RAD_SUBSTRING: &str = "rad";
const RAD_SUFFIX: &str = "_rad";

// ---------------------------------------------------------------------------
// Column normalizer
// ---------------------------------------------------------------------------

/// Canonicalize one raw header: trim, spaces and hyphens to underscores,
/// periods removed, lowercased. Idempotent.
pub fn normalize_column(raw: &str) -> String {
    raw.trim()
        .replace([' ', '-'], "_")
        .replace('.', "")
        .to_lowercase()
}

/// Canonicalize a header row, preserving column positions.
pub fn normalize_columns(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| normalize_column(h)).collect()
}

// ---------------------------------------------------------------------------
// Schema validator
// ---------------------------------------------------------------------------

/// Check that every schema column is present, reporting all missing columns
/// at once. Extra columns are tolerated here; they are dropped during
/// coercion (except the RAD family, which the folder consumes).
pub fn validate_columns(table: TargetTable, present: &[String]) -> Result<()> {
    let missing: Vec<String> = table
        .schema()
        .columns()
        .filter(|col| !present.iter().any(|p| p == col))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LedgerloadError::SchemaMismatch {
            table: table.name().to_string(),
            missing,
        })
    }
}

// ---------------------------------------------------------------------------
// Type coercer
// ---------------------------------------------------------------------------

fn is_null_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    NULL_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m))
}

fn parse_date(column: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y").map_err(|_| LedgerloadError::DateParse {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Strip thousands separators, parse as decimal, round to exactly two
/// fractional digits.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned = raw.replace(',', "");
    let parsed: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| LedgerloadError::AmountParse {
            value: raw.to_string(),
        })?;
    if !parsed.is_finite() {
        return Err(LedgerloadError::AmountParse {
            value: raw.to_string(),
        });
    }
    Ok((parsed * 100.0).round() / 100.0)
}

fn coerce_cell(column: &str, column_type: ColumnType, raw: &str) -> Result<Value> {
    // The amount is required per row: a null or non-numeric cell is an error,
    // never a silent default.
    if column == AMOUNT_COLUMN {
        if is_null_marker(raw) {
            return Err(LedgerloadError::AmountParse {
                value: raw.to_string(),
            });
        }
        return parse_amount(raw).map(Value::Number);
    }

    if is_null_marker(raw) {
        return Ok(Value::Null);
    }

    match column_type {
        ColumnType::Date => parse_date(column, raw).map(Value::Date),
        ColumnType::Numeric | ColumnType::Text => Ok(Value::Text(raw.to_string())),
    }
}

/// Convert the text rows into typed records. Schema columns are coerced per
/// their declared type; columns outside the schema are dropped unless they
/// belong to the RAD family, which must survive until the folder runs.
pub fn coerce_types(
    table: TargetTable,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<Vec<CleanRecord>> {
    let schema = table.schema();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let mut cells = Vec::with_capacity(schema.len() + 1);
        for (idx, name) in headers.iter().enumerate() {
            let raw = row.get(idx).map(String::as_str).unwrap_or("");
            let value = match schema.column_type(name) {
                Some(column_type) => coerce_cell(name, column_type, raw)?,
                None if is_rad_column(name) => coerce_cell(name, ColumnType::Text, raw)?,
                None => continue,
            };
            cells.push((name.clone(), value));
        }
        records.push(CleanRecord { cells });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Dimension folder
// ---------------------------------------------------------------------------

fn is_rad_column(name: &str) -> bool {
    name.to_ascii_lowercase().contains(RAD_SUBSTRING)
}

/// Dimension-type identifier: the column name minus its trailing `_rad`
/// suffix, lowercase retained.
fn rad_type_id(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    lower
        .strip_suffix(RAD_SUFFIX)
        .map(str::to_string)
        .unwrap_or(lower)
}

fn fold_record(record: CleanRecord) -> Result<CleanRecord> {
    let mut cells = Vec::with_capacity(record.cells.len() + 1);
    let mut attributes: Vec<RadAttribute> = Vec::new();

    for (name, value) in record.cells {
        if is_rad_column(&name) {
            if value.is_present() {
                attributes.push(RadAttribute {
                    rad_type_id: rad_type_id(&name),
                    rad_id: value.to_json(),
                });
            }
            continue;
        }
        cells.push((name, value));
    }

    // An empty fold is null, never a serialized empty list.
    let rad_value = if attributes.is_empty() {
        Value::Null
    } else {
        Value::Text(serde_json::to_string(&attributes)?)
    };
    cells.push((RAD_DATA_COLUMN.to_string(), rad_value));

    Ok(CleanRecord { cells })
}

/// Fold every record's sparse RAD columns into a single `rad_data` payload,
/// preserving left-to-right column order within each record.
pub fn fold_rad_columns(records: Vec<CleanRecord>) -> Result<Vec<CleanRecord>> {
    records.into_iter().map(fold_record).collect()
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Run the full cleaning pipeline on one uploaded table. Row order is
/// preserved throughout every stage.
pub fn clean_rows(table: TargetTable, raw: &RawTable) -> Result<Vec<CleanRecord>> {
    let headers = normalize_columns(&raw.headers);
    validate_columns(table, &headers)?;
    let records = coerce_types(table, &headers, &raw.rows)?;
    fold_rad_columns(records)
}
