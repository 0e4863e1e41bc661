use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::Ability;

/// Length of both spell slot arrays. Index 0 is reserved; 1..=9 are spell levels.
pub const SPELL_SLOT_LEN: usize = 10;

/// Character - the root record of a character sheet
///
/// Holds the scalar sheet fields and the aggregate's identity. Every owned
/// row in the store references `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Unique identifier (UUID). Empty until the character is first persisted.
    pub id: String,

    pub name: String,
    pub class_name: String,
    pub race: String,
    pub background: String,
    pub alignment: String,
    pub level: i64,
    pub experience: i64,
    pub proficiency_bonus: i64,

    pub armor_class: i64,
    pub initiative: i64,
    pub speed: i64,
    pub max_hp: i64,
    pub current_hp: i64,
    pub temp_hp: i64,
    pub hit_dice: String,
    pub death_save_successes: i64,
    pub death_save_failures: i64,

    pub spellcasting_ability: Option<Ability>,
    /// Slots available per spell level
    pub spell_slots: Vec<i64>,
    /// Slots expended per spell level
    pub spell_slots_used: Vec<i64>,

    pub personality_traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
    pub notes: String,

    /// Assigned by the store on insert
    pub created_at: DateTime<Utc>,

    /// Refreshed by the store on every write
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a new level 1 character with the given name
    ///
    /// The ID is left empty; the repository assigns one on create.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the character has been assigned an identity
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Bring both spell slot arrays to exactly `SPELL_SLOT_LEN` entries
    pub fn normalize_spell_slots(&mut self) {
        normalize_spell_slots(&mut self.spell_slots);
        normalize_spell_slots(&mut self.spell_slots_used);
    }
}

impl Default for Character {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: String::new(),
            class_name: String::new(),
            race: String::new(),
            background: String::new(),
            alignment: String::new(),
            level: 1,
            experience: 0,
            proficiency_bonus: 2,
            armor_class: 10,
            initiative: 0,
            speed: 30,
            max_hp: 0,
            current_hp: 0,
            temp_hp: 0,
            hit_dice: String::new(),
            death_save_successes: 0,
            death_save_failures: 0,
            spellcasting_ability: None,
            spell_slots: vec![0; SPELL_SLOT_LEN],
            spell_slots_used: vec![0; SPELL_SLOT_LEN],
            personality_traits: String::new(),
            ideals: String::new(),
            bonds: String::new(),
            flaws: String::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Zero-fill a short slot array, or truncate a long one, to `SPELL_SLOT_LEN`
///
/// Existing values keep their positions.
pub fn normalize_spell_slots(slots: &mut Vec<i64>) {
    slots.resize(SPELL_SLOT_LEN, 0);
}
