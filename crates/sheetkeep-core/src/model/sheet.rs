use serde::{Deserialize, Serialize};

use super::character::Character;
use super::collections::{Attack, Feature, Item, Spell};
use super::extensions::{AbilityScores, SavingThrows, Wallet};
use super::skills::SkillDetail;

/// CharacterSheet - the full aggregate for one character
///
/// The unit of consistency: it is written and read as a whole. Collections
/// hold the complete desired state; an update replaces whatever was stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSheet {
    pub character: Character,
    pub abilities: Option<AbilityScores>,
    pub saving_throws: Option<SavingThrows>,
    pub wallet: Option<Wallet>,
    pub items: Vec<Item>,
    pub spells: Vec<Spell>,
    pub attacks: Vec<Attack>,
    pub features: Vec<Feature>,
    pub skills: Vec<SkillDetail>,
}

impl CharacterSheet {
    /// A sheet with only a named root and no extensions or rows
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            character: Character::new(name),
            ..Self::default()
        }
    }

    /// The aggregate's identity (empty until persisted)
    pub fn id(&self) -> &str {
        &self.character.id
    }
}

/// ID and name pair used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
}
