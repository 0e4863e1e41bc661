// Integration tests for opening the database

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sheetkeep_core::ExErrorKind;
use sheetkeep_store::{Database, DbConfig, JournalMode};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_open_creates_missing_directories() {
    // Given: A path whose parent directories do not exist
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("sheets.db");

    // When: The database is opened
    let db = Database::open(&path, &DbConfig::default()).unwrap();

    // Then: The file exists where asked
    assert!(path.exists());
    assert_eq!(db.path(), Some(path.as_path()));
}

#[test]
fn test_open_enables_foreign_keys_and_wal() {
    // Given: A fresh database file
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("sheets.db"), &DbConfig::default()).unwrap();

    // When: The connection settings are queried
    let (foreign_keys, journal_mode) = db
        .with_conn(|conn| {
            let fk: i64 = conn
                .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                .unwrap();
            let mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap();
            Ok((fk, mode))
        })
        .unwrap();

    // Then: Referential integrity and WAL are on
    assert_eq!(foreign_keys, 1);
    assert_eq!(journal_mode.to_lowercase(), "wal");
}

#[test]
fn test_open_honours_config() {
    let dir = TempDir::new().unwrap();
    let config = DbConfig {
        busy_timeout: Duration::from_millis(250),
        journal_mode: JournalMode::Delete,
    };
    let db = Database::open(dir.path().join("sheets.db"), &config).unwrap();

    let mode: String = db
        .with_conn(|conn| {
            Ok(conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap())
        })
        .unwrap();
    assert_eq!(mode.to_lowercase(), "delete");
}

#[test]
fn test_empty_path_is_invalid_input() {
    let err = Database::open("", &DbConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_parent_is_a_file_is_io_error() {
    // Given: A regular file where a directory is expected
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    // When: A database is opened beneath it
    let err = Database::open(blocker.join("sheets.db"), &DbConfig::default()).unwrap_err();

    // Then: Directory creation fails as Io
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_path_is_a_directory_is_connection_error() {
    // Given: A directory where the database file should be
    let dir = TempDir::new().unwrap();

    // When: It is opened as a database
    let err = Database::open(dir.path(), &DbConfig::default()).unwrap_err();

    // Then: The driver-level failure is a connection error
    assert_eq!(err.kind(), ExErrorKind::Connection);
}
