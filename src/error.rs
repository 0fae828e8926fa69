use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerloadError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Column validation failed for table {table}. Missing columns: {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("Could not parse '{value}' in date column {column} (expected MM/DD/YYYY)")]
    DateParse { column: String, value: String },

    #[error("Could not parse '{value}' as an amount")]
    AmountParse { value: String },

    #[error("Unknown grouping: {0}")]
    UnknownGrouping(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LedgerloadError>;
