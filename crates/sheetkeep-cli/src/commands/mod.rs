//! Subcommand implementations

pub mod migrate;
pub mod sheet;
pub mod skills;

use sheetkeep_store::migrations::apply_migrations;
use sheetkeep_store::{Database, DbConfig};
use std::path::Path;
use std::sync::Arc;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database and bring its schema up to date
pub fn open_store(path: &Path) -> Result<Arc<Database>, Box<dyn std::error::Error>> {
    let db = Database::open(path, &DbConfig::default())?;
    db.with_conn(apply_migrations)?;
    tracing::debug!(path = %path.display(), "Store ready");
    Ok(Arc::new(db))
}
