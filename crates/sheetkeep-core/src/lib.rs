//! SheetKeep Core - character sheet domain model and shared facilities
//!
//! This crate provides the pieces every other SheetKeep crate builds on:
//! - The character sheet aggregate (root record, 1:1 extensions, owned collections)
//! - Closed enumerations for proficiency, abilities and equip state
//! - Pure rules such as modifier derivation
//! - The canonical error facility (`ExError`)
//! - The structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use model::{CharacterSheet, CharacterSummary};

// Paths used by the exported logging macros
#[doc(hidden)]
pub mod __private {
    pub use sheetkeep_core_types::schema;
    pub use tracing;
}
