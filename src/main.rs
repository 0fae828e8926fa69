mod cli;
mod db;
mod error;
mod fmt;
mod grouping;
mod models;
mod pipeline;
mod reader;
mod schema;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, GroupingCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Upload {
            file,
            table,
            yes,
            dry_run,
        } => cli::upload::run(&file, &table, yes, dry_run),
        Commands::Check { file } => cli::check::run(&file),
        Commands::Head { table, limit } => cli::head::run(&table, limit),
        Commands::Status => cli::status::run(),
        Commands::Grouping { command } => match command {
            GroupingCommands::Add { name, file } => cli::grouping::add(&name, &file),
            GroupingCommands::List => cli::grouping::list(),
            GroupingCommands::ShowLeaves { name } => cli::grouping::show_leaves(&name),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
