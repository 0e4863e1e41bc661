//! SheetKeep Store - SQLite persistence for character sheets
//!
//! Provides:
//! - Single-connection database handle with integrity checks on open
//! - Up/down migration runner with embedded SQL scripts
//! - Aggregate repository mapping `CharacterSheet` to normalized rows
//! - Read-only skill catalog accessor

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use db::{Database, DbConfig, JournalMode};
pub use errors::Result;
pub use repo::{CharacterRepo, SkillCatalog};
