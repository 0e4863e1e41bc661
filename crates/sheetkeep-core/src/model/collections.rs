//! Owned 1:N rows
//!
//! Each row has its own ID (generated by the repository when `None`) and a
//! back-reference to the owning character. `created_at` is assigned by the
//! repository when absent and carried across later rewrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::EquipState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: Option<String>,
    pub character_id: String,
    pub name: String,
    pub quantity: i64,
    pub weight: f64,
    pub equip_state: EquipState,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: None,
            character_id: String::new(),
            name: String::new(),
            quantity: 1,
            weight: 0.0,
            equip_state: EquipState::Carried,
            description: String::new(),
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    pub id: Option<String>,
    pub character_id: String,
    pub name: String,
    /// 0 for cantrips, otherwise 1..=9
    pub level: i64,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub components: String,
    pub duration: String,
    pub prepared: bool,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Spell {
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        Self {
            name: name.into(),
            level,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attack {
    pub id: Option<String>,
    pub character_id: String,
    pub name: String,
    pub attack_bonus: i64,
    /// Damage expression, e.g. "1d8+3"
    pub damage: String,
    pub damage_type: String,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Attack {
    pub fn new(name: impl Into<String>, attack_bonus: i64, damage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attack_bonus,
            damage: damage.into(),
            ..Self::default()
        }
    }
}

/// Class feature, racial trait, feat and the like
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub id: Option<String>,
    pub character_id: String,
    pub name: String,
    pub source: String,
    pub description: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Feature {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            ..Self::default()
        }
    }
}
