//! Migration framework
//!
//! Provides:
//! - Up/down script parsing with marker lines
//! - Runner with checksums and idempotent application
//! - Ordered revert of applied migrations
//! - Embedded SQL migrations, or scripts loaded from a directory

mod checksums;
mod embedded;
mod runner;
mod script;

pub use embedded::{embedded_migrations, load_dir};
pub use runner::{
    applied_versions, apply_migrations, apply_revert, apply_up, revert_migrations,
    AppliedMigration,
};
pub use script::{Migration, ScriptError, DOWN_MARKER, UP_MARKER};
