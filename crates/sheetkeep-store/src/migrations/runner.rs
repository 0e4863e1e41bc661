//! Migration runner
//!
//! Applies migrations with checksums and idempotency, and reverts them in
//! descending order.

use crate::errors::{checksum_mismatch, migration_error, sql_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{embedded_migrations, into_order};
use crate::migrations::script::Migration;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use sheetkeep_core::ModelError;

/// One row of the `schema_version` bookkeeping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
    /// SHA-256 of the up section at the time it was applied
    pub checksum: String,
}

/// Apply all pending embedded migrations
///
/// ## Errors
///
/// - `Migration`: a script failed or an applied script has changed
/// - `Transaction`: bookkeeping failed
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let migrations = embedded_migrations()?;
    apply_up(conn, &migrations)
}

/// Revert every applied migration using the embedded down scripts
///
/// ## Errors
///
/// - `Migration`: a down script failed or an applied version is unknown
/// - `Transaction`: bookkeeping failed
pub fn revert_migrations(conn: &mut Connection) -> Result<()> {
    let migrations = embedded_migrations()?;
    apply_revert(conn, &migrations)
}

/// Apply each migration in `migrations` that has not been applied yet
///
/// Migrations run in ascending version order whatever the slice order. Each
/// one runs in its own transaction together with its bookkeeping row, so a
/// failing script leaves no trace.
///
/// ## Errors
///
/// - `Migration`: a script failed, two share a version, or an applied
///   script has changed
/// - `Transaction`: bookkeeping failed
pub fn apply_up(conn: &mut Connection, migrations: &[Migration]) -> Result<()> {
    let migrations = into_order(migrations.to_vec())?;
    create_schema_version_table(conn)?;

    for migration in &migrations {
        let checksum = compute_checksum(&migration.up);

        if let Some(stored) = stored_checksum(conn, migration.version)? {
            if stored != checksum {
                return Err(checksum_mismatch(&migration.label(), &stored, &checksum));
            }
            continue;
        }

        let tx = conn.transaction().map_err(sql_error("migration_begin"))?;
        tx.execute_batch(&migration.up)
            .map_err(|e| migration_error(&migration.label(), e))?;
        tx.execute(
            "INSERT INTO schema_version (version, name, applied_at, checksum) VALUES (?1, ?2, ?3, ?4)",
            params![
                migration.version,
                migration.name,
                Utc::now().timestamp_millis(),
                checksum
            ],
        )
        .map_err(sql_error("migration_record"))?;
        tx.commit().map_err(sql_error("migration_commit"))?;

        tracing::debug!(migration = %migration.label(), "Applied migration");
    }

    Ok(())
}

/// Revert every applied version, newest first
///
/// ## Errors
///
/// - `Migration`: a down script failed or an applied version has no script
/// - `Transaction`: bookkeeping failed
pub fn apply_revert(conn: &mut Connection, migrations: &[Migration]) -> Result<()> {
    create_schema_version_table(conn)?;

    let mut applied = applied_versions(conn)?;
    applied.reverse();

    for entry in applied {
        let migration = migrations
            .iter()
            .find(|m| m.version == entry.version)
            .ok_or_else(|| {
                migration_error(
                    &format!("{:04}_{}", entry.version, entry.name),
                    "no script available to revert this version",
                )
            })?;

        let tx = conn.transaction().map_err(sql_error("migration_begin"))?;
        tx.execute_batch(&migration.down)
            .map_err(|e| migration_error(&migration.label(), e))?;
        tx.execute(
            "DELETE FROM schema_version WHERE version = ?1",
            params![entry.version],
        )
        .map_err(sql_error("migration_unrecord"))?;
        tx.commit().map_err(sql_error("migration_commit"))?;

        tracing::debug!(migration = %migration.label(), "Reverted migration");
    }

    Ok(())
}

/// List applied migrations in ascending version order
///
/// A database that has never been migrated has none.
///
/// ## Errors
///
/// - `Transaction`: the bookkeeping table could not be read
pub fn applied_versions(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(sql_error("migration_status"))?;
    if exists.is_none() {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare("SELECT version, name, applied_at, checksum FROM schema_version ORDER BY version")
        .map_err(sql_error("migration_status"))?;
    let rows = stmt
        .query_map([], |row| {
            let applied_at: i64 = row.get(2)?;
            let applied_at = DateTime::from_timestamp_millis(applied_at).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    Type::Integer,
                    Box::new(ModelError::TimestampOutOfRange { value: applied_at }),
                )
            })?;
            Ok(AppliedMigration {
                version: row.get(0)?,
                name: row.get(1)?,
                applied_at,
                checksum: row.get(3)?,
            })
        })
        .map_err(sql_error("migration_status"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error("migration_status"))?;

    Ok(rows)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(sql_error("migration_bookkeeping"))?;

    Ok(())
}

fn stored_checksum(conn: &Connection, version: i64) -> Result<Option<String>> {
    conn.query_row(
        "SELECT checksum FROM schema_version WHERE version = ?1",
        params![version],
        |row| row.get(0),
    )
    .optional()
    .map_err(sql_error("migration_lookup"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkeep_core::ExErrorKind;

    fn script(version: i64, name: &str, up: &str, down: &str) -> Migration {
        Migration {
            version,
            name: name.to_string(),
            up: up.to_string(),
            down: down.to_string(),
        }
    }

    fn table_exists(conn: &Connection, table: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_apply_migrations() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();

        assert!(table_exists(&conn, "characters"));
        assert!(table_exists(&conn, "features"));
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();

        assert_eq!(applied_versions(&conn).unwrap().len(), 2);
    }

    #[test]
    fn test_unmigrated_database_has_no_versions() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(applied_versions(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_failed_script_is_not_recorded() {
        let mut conn = Connection::open_in_memory().unwrap();
        let migrations = vec![
            script(1, "ok", "CREATE TABLE a (x INTEGER);", "DROP TABLE a;"),
            script(2, "broken", "CREATE TABLE b (x INTEGER); NOT SQL;", "DROP TABLE b;"),
        ];

        let err = apply_up(&mut conn, &migrations).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Migration);
        let versions: Vec<i64> = applied_versions(&conn)
            .unwrap()
            .iter()
            .map(|m| m.version)
            .collect();
        assert_eq!(versions, vec![1]);
        assert!(!table_exists(&conn, "b"));
    }

    #[test]
    fn test_revert_runs_newest_first() {
        let mut conn = Connection::open_in_memory().unwrap();
        let migrations = vec![
            script(1, "a", "CREATE TABLE a (x INTEGER);", "DROP TABLE a;"),
            script(
                2,
                "b",
                "CREATE TABLE b (x INTEGER REFERENCES a(x));",
                "DROP TABLE b;",
            ),
        ];
        apply_up(&mut conn, &migrations).unwrap();

        apply_revert(&mut conn, &migrations).unwrap();

        assert!(!table_exists(&conn, "a"));
        assert!(!table_exists(&conn, "b"));
        assert!(applied_versions(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_revert_unknown_version_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_up(
            &mut conn,
            &[script(7, "orphan", "CREATE TABLE o (x);", "DROP TABLE o;")],
        )
        .unwrap();

        let err = apply_revert(&mut conn, &[]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Migration);
    }

    #[test]
    fn test_checksum_drift_detected() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_up(&mut conn, &[script(1, "a", "CREATE TABLE a (x);", "DROP TABLE a;")]).unwrap();

        let edited = script(1, "a", "CREATE TABLE a (x, y);", "DROP TABLE a;");
        let err = apply_up(&mut conn, &[edited]).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Migration);
        assert_eq!(err.op(), Some("migration_checksum"));
    }

    #[test]
    fn test_apply_up_sorts_by_version() {
        // Given: v2 depends on a table v1 creates, passed in reverse
        let mut conn = Connection::open_in_memory().unwrap();
        let migrations = vec![
            script(2, "b", "CREATE TABLE b AS SELECT x FROM a;", "DROP TABLE b;"),
            script(1, "a", "CREATE TABLE a (x INTEGER);", "DROP TABLE a;"),
        ];

        // When: Applying the slice as given
        apply_up(&mut conn, &migrations).unwrap();

        // Then: Both are applied, oldest first
        let versions: Vec<i64> = applied_versions(&conn)
            .unwrap()
            .iter()
            .map(|m| m.version)
            .collect();
        assert_eq!(versions, vec![1, 2]);
        assert!(table_exists(&conn, "b"));
    }

    #[test]
    fn test_apply_up_rejects_duplicate_versions() {
        let mut conn = Connection::open_in_memory().unwrap();
        let migrations = vec![
            script(1, "a", "CREATE TABLE a (x);", "DROP TABLE a;"),
            script(1, "again", "CREATE TABLE again (x);", "DROP TABLE again;"),
        ];

        let err = apply_up(&mut conn, &migrations).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Migration);
        assert!(!table_exists(&conn, "a"));
    }

    #[test]
    fn test_unreadable_applied_at_is_serialization_error() {
        // Given: A bookkeeping row whose timestamp is outside the calendar range
        let mut conn = Connection::open_in_memory().unwrap();
        apply_up(&mut conn, &[script(1, "a", "CREATE TABLE a (x);", "DROP TABLE a;")]).unwrap();
        conn.execute("UPDATE schema_version SET applied_at = ?1", [i64::MAX])
            .unwrap();

        // When / Then: Listing applied versions surfaces the bad row
        let err = applied_versions(&conn).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}
