//! Closed enumerations shared by storage and callers
//!
//! Each type converts to and from the exact value kept in its column.
//! Display strings belong to the presentation layer, not here.

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};

/// Proficiency ordinal used by skills and saving throws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    #[default]
    None,
    Proficient,
    Expertise,
}

impl ProficiencyLevel {
    /// Multiplier applied to the proficiency bonus
    pub fn ordinal(self) -> i64 {
        match self {
            ProficiencyLevel::None => 0,
            ProficiencyLevel::Proficient => 1,
            ProficiencyLevel::Expertise => 2,
        }
    }

    /// Decode a stored ordinal
    pub fn from_ordinal(value: i64) -> Result<Self, ModelError> {
        match value {
            0 => Ok(ProficiencyLevel::None),
            1 => Ok(ProficiencyLevel::Proficient),
            2 => Ok(ProficiencyLevel::Expertise),
            _ => Err(ModelError::UnknownProficiency { value }),
        }
    }
}

/// The six abilities, stored as three-letter codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "str")]
    Strength,
    #[serde(rename = "dex")]
    Dexterity,
    #[serde(rename = "con")]
    Constitution,
    #[serde(rename = "int")]
    Intelligence,
    #[serde(rename = "wis")]
    Wisdom,
    #[serde(rename = "cha")]
    Charisma,
}

impl Ability {
    /// All abilities in sheet order
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Stored code
    pub fn code(self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    /// Decode a stored code
    pub fn from_code(code: &str) -> Result<Self, ModelError> {
        Ability::ALL
            .into_iter()
            .find(|a| a.code() == code)
            .ok_or_else(|| ModelError::UnknownAbility {
                code: code.to_string(),
            })
    }
}

/// Whether an item is merely carried, worn/wielded, or attuned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipState {
    #[default]
    Carried,
    Equipped,
    Attuned,
}

impl EquipState {
    pub fn ordinal(self) -> i64 {
        match self {
            EquipState::Carried => 0,
            EquipState::Equipped => 1,
            EquipState::Attuned => 2,
        }
    }

    pub fn from_ordinal(value: i64) -> Result<Self, ModelError> {
        match value {
            0 => Ok(EquipState::Carried),
            1 => Ok(EquipState::Equipped),
            2 => Ok(EquipState::Attuned),
            _ => Err(ModelError::UnknownEquipState { value }),
        }
    }
}
