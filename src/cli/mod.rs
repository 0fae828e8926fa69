pub mod check;
pub mod grouping;
pub mod head;
pub mod init;
pub mod status;
pub mod upload;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ledgerload",
    about = "Clean and load finance CSV exports into staging tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up ledgerload: choose a data directory and initialize the database.
    Init {
        /// Path for ledgerload data (default: ~/Documents/ledgerload)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Clean an uploaded CSV and load it into a staging table.
    Upload {
        /// Path to the CSV export
        file: String,
        /// Target staging table (manual_journal_entry_transaction or manual_budget)
        #[arg(long)]
        table: String,
        /// Skip the ingestion confirmation prompt
        #[arg(long)]
        yes: bool,
        /// Clean and preview only; do not touch the database
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
    /// Preview a trial balance CSV and warn about missing expected columns.
    Check {
        /// Path to the CSV export
        file: String,
    },
    /// Show the first rows of a staging table.
    Head {
        /// Target staging table
        table: String,
        /// How many rows to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Show current database and row counts.
    Status,
    /// Manage grouping definitions (JSON trees).
    Grouping {
        #[command(subcommand)]
        command: GroupingCommands,
    },
}

#[derive(Subcommand)]
pub enum GroupingCommands {
    /// Store a new grouping definition from a JSON file.
    Add {
        /// Grouping name
        name: String,
        /// Path to the JSON tree definition
        #[arg(long)]
        file: String,
    },
    /// List stored grouping definitions, newest first.
    List,
    /// Enumerate the leaf nodes of a stored grouping tree.
    ShowLeaves {
        /// Grouping name
        name: String,
    },
}
