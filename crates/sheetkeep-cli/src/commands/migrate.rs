//! Migration commands
//!
//! Usage: sheetkeep migrate <up|down|status>

use super::CmdResult;
use clap::{Args, Subcommand};
use sheetkeep_store::migrations::{
    applied_versions, apply_migrations, embedded_migrations, revert_migrations,
};
use sheetkeep_store::{Database, DbConfig};
use std::path::Path;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply every pending migration
    Up,
    /// Revert every applied migration, newest first
    Down,
    /// Show applied and pending migrations
    Status,
}

pub fn execute(db_path: &Path, args: MigrateArgs) -> CmdResult {
    let db = Database::open(db_path, &DbConfig::default())?;

    match args.command {
        MigrateCommand::Up => {
            db.with_conn(apply_migrations)?;
            println!("Migrations applied");
        }
        MigrateCommand::Down => {
            db.with_conn(revert_migrations)?;
            println!("Migrations reverted");
        }
        MigrateCommand::Status => {
            let applied = db.with_conn(|conn| applied_versions(conn))?;
            for migration in embedded_migrations()? {
                let state = match applied.iter().find(|a| a.version == migration.version) {
                    Some(a) => format!("applied {}", a.applied_at.to_rfc3339()),
                    None => "pending".to_string(),
                };
                println!("{}\t{}", migration.label(), state);
            }
        }
    }

    Ok(())
}
