//! Migration sources
//!
//! The shipped migrations are embedded at compile time using include_str!.
//! `load_dir` reads the same format from disk.

use super::script::Migration;
use crate::errors::{io_error, migration_error, Result};
use std::path::Path;

const EMBEDDED: &[(&str, &str)] = &[
    (
        "0001_initial_schema.sql",
        include_str!("../../migrations/0001_initial_schema.sql"),
    ),
    (
        "0002_features.sql",
        include_str!("../../migrations/0002_features.sql"),
    ),
];

/// Get all embedded migrations in ascending version order
///
/// ## Errors
///
/// - `Migration`: a script is malformed or two share a version
pub fn embedded_migrations() -> Result<Vec<Migration>> {
    let migrations = EMBEDDED
        .iter()
        .map(|(file_name, script)| parse(file_name, script))
        .collect::<Result<Vec<_>>>()?;
    into_order(migrations)
}

/// Load every `*.sql` file in `dir` as a migration, in ascending version order
///
/// ## Errors
///
/// - `Io`: the directory or a file could not be read
/// - `Migration`: a script is malformed or two share a version
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Migration>> {
    let entries = std::fs::read_dir(dir.as_ref()).map_err(|e| io_error("migrations_read_dir", e))?;

    let mut migrations = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error("migrations_read_dir", e))?.path();
        if path.extension().map(|ext| ext != "sql").unwrap_or(true) {
            continue;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let script =
            std::fs::read_to_string(&path).map_err(|e| io_error("migrations_read_file", e))?;
        migrations.push(parse(&file_name, &script)?);
    }

    into_order(migrations)
}

fn parse(file_name: &str, script: &str) -> Result<Migration> {
    Migration::parse(file_name, script).map_err(|e| migration_error(file_name, e))
}

/// Sort by ascending version, rejecting duplicate versions
pub(super) fn into_order(mut migrations: Vec<Migration>) -> Result<Vec<Migration>> {
    migrations.sort_by_key(|m| m.version);
    if let Some(pair) = migrations.windows(2).find(|w| w[0].version == w[1].version) {
        return Err(migration_error(
            &pair[1].label(),
            format!("version {} is used twice", pair[1].version),
        ));
    }
    Ok(migrations)
}
