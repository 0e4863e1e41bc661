//! 1:1 extension records
//!
//! Each is stored in its own table keyed by the owning character's ID and
//! has no identity of its own.

use serde::{Deserialize, Serialize};

use super::enums::{Ability, ProficiencyLevel};

/// The six ability scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    pub character_id: String,
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
}

impl AbilityScores {
    /// Score for one ability
    pub fn score(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            character_id: String::new(),
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Saving-throw proficiency per ability
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingThrows {
    pub character_id: String,
    pub strength: ProficiencyLevel,
    pub dexterity: ProficiencyLevel,
    pub constitution: ProficiencyLevel,
    pub intelligence: ProficiencyLevel,
    pub wisdom: ProficiencyLevel,
    pub charisma: ProficiencyLevel,
}

impl SavingThrows {
    /// Proficiency for one ability's saving throw
    pub fn level(&self, ability: Ability) -> ProficiencyLevel {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

/// Coin purse
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    pub character_id: String,
    pub copper: i64,
    pub silver: i64,
    pub electrum: i64,
    pub gold: i64,
    pub platinum: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_lookup_is_explicit() {
        let scores = AbilityScores {
            strength: 8,
            charisma: 17,
            ..AbilityScores::default()
        };
        assert_eq!(scores.score(Ability::Strength), 8);
        assert_eq!(scores.score(Ability::Charisma), 17);
        assert_eq!(scores.score(Ability::Wisdom), 10);
    }

    #[test]
    fn test_saving_throw_lookup() {
        let saves = SavingThrows {
            dexterity: ProficiencyLevel::Proficient,
            ..SavingThrows::default()
        };
        assert_eq!(saves.level(Ability::Dexterity), ProficiencyLevel::Proficient);
        assert_eq!(saves.level(Ability::Strength), ProficiencyLevel::None);
    }
}
