use std::fmt;
use std::str::FromStr;

use crate::error::LedgerloadError;

/// Column carrying the transaction amount; the only column with dedicated
/// numeric cleanup rules.
pub const AMOUNT_COLUMN: &str = "amount";

/// Column used by the staging tables to window re-uploads.
pub const ACCOUNTING_DATE_COLUMN: &str = "accounting_date";

/// Synthetic column holding the folded RAD payload.
pub const RAD_DATA_COLUMN: &str = "rad_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Date,
    Numeric,
    Text,
}

/// Closed set of staging tables an upload may target. Unknown table names
/// fail at parse time, before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTable {
    ManualJournalEntryTransaction,
    ManualBudget,
}

const ALL_TABLES: &[TargetTable] = &[
    TargetTable::ManualJournalEntryTransaction,
    TargetTable::ManualBudget,
];

// Canonical (lowercase) column names, in insertion order.
const JOURNAL_COLUMNS: &[(&str, ColumnType)] = &[
    ("entry_id", ColumnType::Text),
    ("entry_detail_id", ColumnType::Text),
    ("seqno", ColumnType::Text),
    ("accounting_date", ColumnType::Date),
    ("account", ColumnType::Text),
    ("description", ColumnType::Text),
    ("amount", ColumnType::Numeric),
    ("cash_rad", ColumnType::Text),
    ("travel_rad", ColumnType::Text),
];

const BUDGET_COLUMNS: &[(&str, ColumnType)] = &[
    ("fiscal_year", ColumnType::Text),
    ("accounting_date", ColumnType::Date),
    ("account", ColumnType::Text),
    ("description", ColumnType::Text),
    ("amount", ColumnType::Numeric),
];

impl TargetTable {
    pub fn all() -> &'static [TargetTable] {
        ALL_TABLES
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ManualJournalEntryTransaction => "manual_journal_entry_transaction",
            Self::ManualBudget => "manual_budget",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Self::ManualJournalEntryTransaction => Schema {
                columns: JOURNAL_COLUMNS,
            },
            Self::ManualBudget => Schema {
                columns: BUDGET_COLUMNS,
            },
        }
    }
}

impl FromStr for TargetTable {
    type Err = LedgerloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ALL_TABLES
            .iter()
            .find(|t| t.name() == key)
            .copied()
            .ok_or_else(|| LedgerloadError::UnknownTable(s.to_string()))
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Expected column set and declared types for one staging table.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    columns: &'static [(&'static str, ColumnType)],
}

impl Schema {
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(col, _)| *col == name)
            .map(|(_, ty)| *ty)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
