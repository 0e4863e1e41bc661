//! Character sheet aggregate model
//!
//! One `Character` root, three optional 1:1 extensions, four owned
//! collections and the per-character skill rows.

pub mod character;
pub mod collections;
pub mod enums;
pub mod extensions;
pub mod sheet;
pub mod skills;

pub use character::{normalize_spell_slots, Character, SPELL_SLOT_LEN};
pub use collections::{Attack, Feature, Item, Spell};
pub use enums::{Ability, EquipState, ProficiencyLevel};
pub use extensions::{AbilityScores, SavingThrows, Wallet};
pub use sheet::{CharacterSheet, CharacterSummary};
pub use skills::{SkillAssignment, SkillDefinition, SkillDetail};
