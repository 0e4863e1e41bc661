//! Skill catalog entries and per-character skill rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Ability, ProficiencyLevel};

/// Fixed reference row from the skill catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Stable catalog key
    pub id: i64,
    pub name: String,
    /// Governing ability
    pub ability: Ability,
}

/// Stored link between a character and a catalog skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssignment {
    pub id: Option<String>,
    pub character_id: String,
    pub skill_id: i64,
    pub proficiency: ProficiencyLevel,
    pub custom_modifier: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SkillAssignment {
    /// Untrained assignment for a catalog entry, as seeded for new characters
    pub fn seed(character_id: impl Into<String>, definition: &SkillDefinition) -> Self {
        Self {
            id: None,
            character_id: character_id.into(),
            skill_id: definition.id,
            proficiency: ProficiencyLevel::None,
            custom_modifier: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

/// An assignment joined with its catalog definition
///
/// This is the shape callers read and edit. `name` and `ability` are
/// denormalized from the catalog and are never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDetail {
    pub id: Option<String>,
    pub character_id: String,
    pub skill_id: i64,
    pub name: String,
    pub ability: Ability,
    pub proficiency: ProficiencyLevel,
    #[serde(default)]
    pub custom_modifier: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SkillDetail {
    /// Project down to the stored assignment shape, dropping the catalog fields
    pub fn to_assignment(&self) -> SkillAssignment {
        SkillAssignment {
            id: self.id.clone(),
            character_id: self.character_id.clone(),
            skill_id: self.skill_id,
            proficiency: self.proficiency,
            custom_modifier: self.custom_modifier,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
