//! Repository layer
//!
//! `CharacterRepo` persists whole character sheets; `SkillCatalog` reads the
//! fixed skill reference table. Both share one `Database`.

mod character_repo;
mod rows;
mod skill_catalog;

pub use character_repo::CharacterRepo;
pub use skill_catalog::SkillCatalog;
