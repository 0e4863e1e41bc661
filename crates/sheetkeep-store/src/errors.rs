//! Error helpers for sheetkeep-store
//!
//! Wraps sheetkeep-core ExError with store-specific constructors

use sheetkeep_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Map a rusqlite error raised inside repository work
///
/// Decoding failures become `Serialization`; everything else is a
/// `Transaction` failure.
pub fn sql_error(op: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| {
        let kind = match &err {
            rusqlite::Error::FromSqlConversionFailure(..) => ExErrorKind::Serialization,
            _ => ExErrorKind::Transaction,
        };
        ExError::new(kind).with_op(op).with_message(err.to_string())
    }
}

/// Create a connection error
pub fn connection_error(op: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Connection)
        .with_op(op.to_string())
        .with_message(reason.to_string())
}

/// Create a migration error
pub fn migration_error(migration: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration")
        .with_entity_id(migration.to_string())
        .with_message(format!("Migration {} failed: {}", migration, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration_checksum")
        .with_entity_id(migration.to_string())
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration, expected, actual
        ))
}

/// Create an invalid input error
pub fn invalid_input(op: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(op.to_string())
        .with_message(reason.to_string())
}

/// Create a not found error for a character
pub fn character_not_found(op: &str, id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op.to_string())
        .with_entity_id(id.to_string())
        .with_message("Character not found")
}

/// Create a cancellation error
pub fn cancelled(op: &str) -> ExError {
    ExError::new(ExErrorKind::Cancelled)
        .with_op(op.to_string())
        .with_message("Request context cancelled")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
