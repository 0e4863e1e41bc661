//! SheetKeep CLI
//!
//! Command-line interface for SheetKeep character sheet storage

use clap::{Parser, Subcommand, ValueEnum};
use sheetkeep_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sheetkeep")]
#[command(about = "SheetKeep - Character sheet storage", long_about = None)]
struct Cli {
    /// Database file, created along with its directory when missing
    #[arg(long, global = true, env = "SHEETKEEP_DB", default_value = ".sheetkeep/sheets.db")]
    db: PathBuf,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Dev)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    /// Human-readable
    Dev,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Create an empty character with seeded skills
    New(commands::sheet::NewArgs),
    /// Create a character from a JSON sheet
    Import(commands::sheet::FileArgs),
    /// Replace a stored character with a JSON sheet
    Apply(commands::sheet::FileArgs),
    /// List characters by name
    List,
    /// Print a character sheet as JSON
    Show(commands::sheet::IdArgs),
    /// Print derived ability, save and skill modifiers
    Modifiers(commands::sheet::IdArgs),
    /// Delete a character and everything it owns
    Delete(commands::sheet::IdArgs),
    /// List the skill catalog
    Skills,
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(&cli.db, args),
        Commands::New(args) => commands::sheet::execute_new(&cli.db, args),
        Commands::Import(args) => commands::sheet::execute_import(&cli.db, args),
        Commands::Apply(args) => commands::sheet::execute_apply(&cli.db, args),
        Commands::List => commands::sheet::execute_list(&cli.db),
        Commands::Show(args) => commands::sheet::execute_show(&cli.db, args),
        Commands::Modifiers(args) => commands::sheet::execute_modifiers(&cli.db, args),
        Commands::Delete(args) => commands::sheet::execute_delete(&cli.db, args),
        Commands::Skills => commands::skills::execute(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
