//! Database connection management
//!
//! A `Database` owns exactly one SQLite connection. SQLite is an embedded,
//! single-writer engine, so there is no pool: callers on any thread take
//! turns on the connection through a mutex.

use crate::errors::{cancelled, connection_error, invalid_input, io_error, sql_error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use sheetkeep_core_types::RequestContext;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// SQLite journal mode applied on open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    Wal,
    Delete,
    Memory,
}

impl JournalMode {
    fn as_pragma(self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Memory => "MEMORY",
        }
    }
}

/// Connection settings
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
    pub journal_mode: JournalMode,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            journal_mode: JournalMode::Wal,
        }
    }
}

/// Handle to the single database connection
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if needed) the database file at `path`
    ///
    /// The parent directory is created when missing. The connection is
    /// pinged and has foreign keys enabled before it is handed back; if
    /// either step fails the connection is closed and an error returned.
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: empty path
    /// - `Io`: the parent directory could not be created
    /// - `Connection`: open, ping or pragma setup failed
    pub fn open<P: AsRef<Path>>(path: P, config: &DbConfig) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(invalid_input("db_open", "database path is empty"));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("db_create_dir", e))?;
        }

        let conn = Connection::open(path).map_err(|e| connection_error("db_open", e))?;
        let conn = configure(conn, config)?;

        tracing::debug!(path = %path.display(), "Opened database");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing)
    ///
    /// ## Errors
    ///
    /// - `Connection`: open, ping or pragma setup failed
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| connection_error("db_open_in_memory", e))?;
        let config = DbConfig {
            journal_mode: JournalMode::Memory,
            ..DbConfig::default()
        };
        let conn = configure(conn, &config)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Location of the database file, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lend the connection to `f`, blocking until it is free
    ///
    /// ## Errors
    ///
    /// - `Connection`: a previous holder panicked while using the connection
    /// - anything `f` returns
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| connection_error("db_lock", "connection mutex poisoned"))?;
        f(&mut conn)
    }

    /// Run `f` inside one immediate transaction
    ///
    /// Commits only if `f` succeeds and `ctx` is still live afterwards.
    /// Returning early drops the transaction, which rolls it back.
    ///
    /// ## Errors
    ///
    /// - `Cancelled`: `ctx` was cancelled before commit
    /// - `Transaction`: begin or commit failed
    /// - anything `f` returns
    pub fn transaction<T>(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        self.with_conn(|conn| {
            ensure_active(ctx, op)?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(sql_error(op))?;

            let value = f(&tx)?;

            ensure_active(ctx, op)?;
            tx.commit().map_err(sql_error(op))?;
            Ok(value)
        })
    }
}

/// Fail with `Cancelled` if the caller has given up on this request
///
/// ## Errors
///
/// - `Cancelled`: `ctx` has been cancelled
pub fn ensure_active(ctx: &RequestContext, op: &str) -> Result<()> {
    if ctx.is_cancelled() {
        return Err(cancelled(op));
    }
    Ok(())
}

/// Apply settings and health checks, closing the connection on failure
fn configure(conn: Connection, config: &DbConfig) -> Result<Connection> {
    match apply_settings(&conn, config) {
        Ok(()) => Ok(conn),
        Err(err) => {
            if let Err((_, close_err)) = conn.close() {
                tracing::debug!(error = %close_err, "Close after failed configure also failed");
            }
            Err(err)
        }
    }
}

fn apply_settings(conn: &Connection, config: &DbConfig) -> Result<()> {
    // Liveness check
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map_err(|e| connection_error("db_ping", e))?;

    conn.busy_timeout(config.busy_timeout)
        .map_err(|e| connection_error("db_busy_timeout", e))?;

    // Enable foreign keys and confirm the setting took
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| connection_error("db_foreign_keys", e))?;
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(|e| connection_error("db_foreign_keys", e))?;
    if enabled != 1 {
        return Err(connection_error(
            "db_foreign_keys",
            "foreign key enforcement could not be enabled",
        ));
    }

    // journal_mode returns the resulting mode as a row
    let mode: String = conn
        .query_row(
            &format!("PRAGMA journal_mode = {}", config.journal_mode.as_pragma()),
            [],
            |row| row.get(0),
        )
        .map_err(|e| connection_error("db_journal_mode", e))?;
    tracing::debug!(journal_mode = %mode, "Configured connection");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkeep_core::ExErrorKind;

    #[test]
    fn test_open_in_memory_enables_foreign_keys() {
        let db = Database::open_in_memory().unwrap();
        let enabled: i64 = db
            .with_conn(|conn| {
                conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                    .map_err(sql_error("test"))
            })
            .unwrap();
        assert_eq!(enabled, 1);
        assert!(db.path().is_none());
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = Database::open("", &DbConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_cancelled_context_skips_transaction() {
        let db = Database::open_in_memory().unwrap();
        let ctx = RequestContext::new();
        ctx.cancel();

        let mut ran = false;
        let err = db
            .transaction(&ctx, "noop", |_tx| {
                ran = true;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Cancelled);
        assert!(!ran);
    }
}
