//! Table-level reads and writes
//!
//! Each helper maps one relation of the aggregate to its table. Helpers take
//! `&Connection` so they run inside a caller's transaction (a `Transaction`
//! derefs to `Connection`). None of them commit or log lifecycle events.

use crate::errors::{sql_error, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use sheetkeep_core::model::{
    Ability, AbilityScores, Attack, Character, CharacterSummary, EquipState, Feature, Item,
    ProficiencyLevel, SavingThrows, SkillAssignment, SkillDefinition, SkillDetail, Spell, Wallet,
};
use sheetkeep_core::{ExError, ModelError};

/// Owned tables cleared by owner ID before the root row goes
pub(crate) const OWNED_TABLES: [&str; 8] = [
    "wallets",
    "ability_scores",
    "saving_throws",
    "items",
    "spells",
    "attacks",
    "features",
    "character_skills",
];

/// Fresh time-ordered row ID
pub(crate) fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Unix nanoseconds; carried timestamps round-trip at full precision
fn to_nanos(at: DateTime<Utc>) -> Result<i64> {
    at.timestamp_nanos_opt().ok_or_else(|| {
        ExError::from(ModelError::TimestampOutOfRange {
            value: at.timestamp(),
        })
        .with_op("encode_timestamp")
    })
}

fn from_nanos(row: &Row<'_>, col: usize) -> rusqlite::Result<DateTime<Utc>> {
    Ok(DateTime::from_timestamp_nanos(row.get(col)?))
}

/// Existing non-empty ID, or a fresh one
fn row_id(id: &Option<String>) -> String {
    id.as_deref()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_id)
}

fn decode_failure(col: usize, ty: Type, err: ModelError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, ty, Box::new(err))
}

fn encode_slots(slots: &[i64]) -> Result<String> {
    serde_json::to_string(slots)
        .map_err(|e| ExError::from(ModelError::from(e)).with_op("encode_spell_slots"))
}

fn decode_slots(row: &Row<'_>, col: usize) -> rusqlite::Result<Vec<i64>> {
    let text: String = row.get(col)?;
    serde_json::from_str(&text).map_err(|e| decode_failure(col, Type::Text, ModelError::from(e)))
}

fn proficiency(row: &Row<'_>, col: usize) -> rusqlite::Result<ProficiencyLevel> {
    ProficiencyLevel::from_ordinal(row.get(col)?).map_err(|e| decode_failure(col, Type::Integer, e))
}

fn ability(row: &Row<'_>, col: usize) -> rusqlite::Result<Ability> {
    let code: String = row.get(col)?;
    Ability::from_code(&code).map_err(|e| decode_failure(col, Type::Text, e))
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

const CHARACTER_COLUMNS: &str = "id, name, class_name, race, background, alignment, level, \
     experience, proficiency_bonus, armor_class, initiative, speed, max_hp, current_hp, temp_hp, \
     hit_dice, death_save_successes, death_save_failures, spellcasting_ability, spell_slots, \
     spell_slots_used, personality_traits, ideals, bonds, flaws, notes, created_at, updated_at";

/// Insert the root row and return the stored ID
///
/// `character.id` must already be set; both spell slot arrays are written as given.
pub(crate) fn insert_character(conn: &Connection, character: &Character) -> Result<String> {
    let slots = encode_slots(&character.spell_slots)?;
    let slots_used = encode_slots(&character.spell_slots_used)?;
    let sql = format!(
        "INSERT INTO characters ({CHARACTER_COLUMNS}) VALUES \
         (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, \
          ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28) RETURNING id"
    );

    conn.query_row(
        &sql,
        params![
            character.id,
            character.name,
            character.class_name,
            character.race,
            character.background,
            character.alignment,
            character.level,
            character.experience,
            character.proficiency_bonus,
            character.armor_class,
            character.initiative,
            character.speed,
            character.max_hp,
            character.current_hp,
            character.temp_hp,
            character.hit_dice,
            character.death_save_successes,
            character.death_save_failures,
            character.spellcasting_ability.map(Ability::code),
            slots,
            slots_used,
            character.personality_traits,
            character.ideals,
            character.bonds,
            character.flaws,
            character.notes,
            to_nanos(character.created_at)?,
            to_nanos(character.updated_at)?,
        ],
        |row| row.get(0),
    )
    .map_err(sql_error("insert_character"))
}

/// Overwrite every mutable root column; `created_at` is left alone
///
/// Returns false when no row has that ID.
pub(crate) fn update_character(conn: &Connection, character: &Character) -> Result<bool> {
    let slots = encode_slots(&character.spell_slots)?;
    let slots_used = encode_slots(&character.spell_slots_used)?;

    let changed = conn
        .execute(
            "UPDATE characters SET
                name = ?2, class_name = ?3, race = ?4, background = ?5, alignment = ?6,
                level = ?7, experience = ?8, proficiency_bonus = ?9, armor_class = ?10,
                initiative = ?11, speed = ?12, max_hp = ?13, current_hp = ?14, temp_hp = ?15,
                hit_dice = ?16, death_save_successes = ?17, death_save_failures = ?18,
                spellcasting_ability = ?19, spell_slots = ?20, spell_slots_used = ?21,
                personality_traits = ?22, ideals = ?23, bonds = ?24, flaws = ?25, notes = ?26,
                updated_at = ?27
             WHERE id = ?1",
            params![
                character.id,
                character.name,
                character.class_name,
                character.race,
                character.background,
                character.alignment,
                character.level,
                character.experience,
                character.proficiency_bonus,
                character.armor_class,
                character.initiative,
                character.speed,
                character.max_hp,
                character.current_hp,
                character.temp_hp,
                character.hit_dice,
                character.death_save_successes,
                character.death_save_failures,
                character.spellcasting_ability.map(Ability::code),
                slots,
                slots_used,
                character.personality_traits,
                character.ideals,
                character.bonds,
                character.flaws,
                character.notes,
                to_nanos(character.updated_at)?,
            ],
        )
        .map_err(sql_error("update_character"))?;

    Ok(changed > 0)
}

fn character_from_row(row: &Row<'_>) -> rusqlite::Result<Character> {
    let spellcasting: Option<String> = row.get(18)?;
    let spellcasting_ability = spellcasting
        .map(|code| Ability::from_code(&code))
        .transpose()
        .map_err(|e| decode_failure(18, Type::Text, e))?;

    Ok(Character {
        id: row.get(0)?,
        name: row.get(1)?,
        class_name: row.get(2)?,
        race: row.get(3)?,
        background: row.get(4)?,
        alignment: row.get(5)?,
        level: row.get(6)?,
        experience: row.get(7)?,
        proficiency_bonus: row.get(8)?,
        armor_class: row.get(9)?,
        initiative: row.get(10)?,
        speed: row.get(11)?,
        max_hp: row.get(12)?,
        current_hp: row.get(13)?,
        temp_hp: row.get(14)?,
        hit_dice: row.get(15)?,
        death_save_successes: row.get(16)?,
        death_save_failures: row.get(17)?,
        spellcasting_ability,
        spell_slots: decode_slots(row, 19)?,
        spell_slots_used: decode_slots(row, 20)?,
        personality_traits: row.get(21)?,
        ideals: row.get(22)?,
        bonds: row.get(23)?,
        flaws: row.get(24)?,
        notes: row.get(25)?,
        created_at: from_nanos(row, 26)?,
        updated_at: from_nanos(row, 27)?,
    })
}

pub(crate) fn load_character(conn: &Connection, id: &str) -> Result<Option<Character>> {
    let sql = format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?1");
    conn.query_row(&sql, [id], character_from_row)
        .optional()
        .map_err(sql_error("load_character"))
}

pub(crate) fn character_exists(conn: &Connection, id: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM characters WHERE id = ?1", [id], |row| row.get(0))
        .optional()
        .map_err(sql_error("character_exists"))?;
    Ok(found.is_some())
}

pub(crate) fn list_summaries(conn: &Connection) -> Result<Vec<CharacterSummary>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM characters ORDER BY name, id")
        .map_err(sql_error("list_summary"))?;
    let summaries = stmt
        .query_map([], |row| {
            Ok(CharacterSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(sql_error("list_summary"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error("list_summary"))?;
    Ok(summaries)
}

pub(crate) fn delete_character(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM characters WHERE id = ?1", [id])
        .map_err(sql_error("delete_character"))?;
    Ok(())
}

/// Remove every row `table` holds for one owner
pub(crate) fn delete_owned(conn: &Connection, table: &str, character_id: &str) -> Result<()> {
    conn.execute(
        &format!("DELETE FROM {table} WHERE character_id = ?1"),
        [character_id],
    )
    .map_err(sql_error("delete_owned_rows"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 1:1 extensions
// ---------------------------------------------------------------------------

/// Delete the owner's ability scores, then insert `scores` if given
pub(crate) fn replace_abilities(
    conn: &Connection,
    character_id: &str,
    scores: Option<&AbilityScores>,
) -> Result<()> {
    delete_owned(conn, "ability_scores", character_id)?;
    if let Some(s) = scores {
        conn.execute(
            "INSERT INTO ability_scores
                (character_id, strength, dexterity, constitution, intelligence, wisdom, charisma)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                character_id,
                s.strength,
                s.dexterity,
                s.constitution,
                s.intelligence,
                s.wisdom,
                s.charisma
            ],
        )
        .map_err(sql_error("insert_ability_scores"))?;
    }
    Ok(())
}

pub(crate) fn load_abilities(conn: &Connection, character_id: &str) -> Result<Option<AbilityScores>> {
    conn.query_row(
        "SELECT character_id, strength, dexterity, constitution, intelligence, wisdom, charisma
         FROM ability_scores WHERE character_id = ?1",
        [character_id],
        |row| {
            Ok(AbilityScores {
                character_id: row.get(0)?,
                strength: row.get(1)?,
                dexterity: row.get(2)?,
                constitution: row.get(3)?,
                intelligence: row.get(4)?,
                wisdom: row.get(5)?,
                charisma: row.get(6)?,
            })
        },
    )
    .optional()
    .map_err(sql_error("load_ability_scores"))
}

pub(crate) fn replace_saving_throws(
    conn: &Connection,
    character_id: &str,
    saves: Option<&SavingThrows>,
) -> Result<()> {
    delete_owned(conn, "saving_throws", character_id)?;
    if let Some(s) = saves {
        conn.execute(
            "INSERT INTO saving_throws
                (character_id, strength, dexterity, constitution, intelligence, wisdom, charisma)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                character_id,
                s.strength.ordinal(),
                s.dexterity.ordinal(),
                s.constitution.ordinal(),
                s.intelligence.ordinal(),
                s.wisdom.ordinal(),
                s.charisma.ordinal()
            ],
        )
        .map_err(sql_error("insert_saving_throws"))?;
    }
    Ok(())
}

pub(crate) fn load_saving_throws(
    conn: &Connection,
    character_id: &str,
) -> Result<Option<SavingThrows>> {
    conn.query_row(
        "SELECT character_id, strength, dexterity, constitution, intelligence, wisdom, charisma
         FROM saving_throws WHERE character_id = ?1",
        [character_id],
        |row| {
            Ok(SavingThrows {
                character_id: row.get(0)?,
                strength: proficiency(row, 1)?,
                dexterity: proficiency(row, 2)?,
                constitution: proficiency(row, 3)?,
                intelligence: proficiency(row, 4)?,
                wisdom: proficiency(row, 5)?,
                charisma: proficiency(row, 6)?,
            })
        },
    )
    .optional()
    .map_err(sql_error("load_saving_throws"))
}

pub(crate) fn replace_wallet(
    conn: &Connection,
    character_id: &str,
    wallet: Option<&Wallet>,
) -> Result<()> {
    delete_owned(conn, "wallets", character_id)?;
    if let Some(w) = wallet {
        conn.execute(
            "INSERT INTO wallets (character_id, copper, silver, electrum, gold, platinum)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![character_id, w.copper, w.silver, w.electrum, w.gold, w.platinum],
        )
        .map_err(sql_error("insert_wallet"))?;
    }
    Ok(())
}

pub(crate) fn load_wallet(conn: &Connection, character_id: &str) -> Result<Option<Wallet>> {
    conn.query_row(
        "SELECT character_id, copper, silver, electrum, gold, platinum
         FROM wallets WHERE character_id = ?1",
        [character_id],
        |row| {
            Ok(Wallet {
                character_id: row.get(0)?,
                copper: row.get(1)?,
                silver: row.get(2)?,
                electrum: row.get(3)?,
                gold: row.get(4)?,
                platinum: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(sql_error("load_wallet"))
}

// ---------------------------------------------------------------------------
// 1:N collections
// ---------------------------------------------------------------------------

fn collect_rows<T>(
    conn: &Connection,
    op: &'static str,
    sql: &str,
    character_id: &str,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql).map_err(sql_error(op))?;
    let rows = stmt
        .query_map([character_id], map)
        .map_err(sql_error(op))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error(op))?;
    Ok(rows)
}

/// Replace all items for the owner with `items`
pub(crate) fn replace_items(
    conn: &Connection,
    character_id: &str,
    items: &[Item],
    now: DateTime<Utc>,
) -> Result<()> {
    delete_owned(conn, "items", character_id)?;
    for item in items {
        conn.execute(
            "INSERT INTO items
                (id, character_id, name, quantity, weight, equip_state, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                row_id(&item.id),
                character_id,
                item.name,
                item.quantity,
                item.weight,
                item.equip_state.ordinal(),
                item.description,
                to_nanos(item.created_at.unwrap_or(now))?,
            ],
        )
        .map_err(sql_error("insert_item"))?;
    }
    Ok(())
}

pub(crate) fn load_items(conn: &Connection, character_id: &str) -> Result<Vec<Item>> {
    collect_rows(
        conn,
        "load_items",
        "SELECT id, character_id, name, quantity, weight, equip_state, description, created_at
         FROM items WHERE character_id = ?1 ORDER BY created_at, rowid",
        character_id,
        |row| {
            Ok(Item {
                id: Some(row.get(0)?),
                character_id: row.get(1)?,
                name: row.get(2)?,
                quantity: row.get(3)?,
                weight: row.get(4)?,
                equip_state: EquipState::from_ordinal(row.get(5)?)
                    .map_err(|e| decode_failure(5, Type::Integer, e))?,
                description: row.get(6)?,
                created_at: Some(from_nanos(row, 7)?),
            })
        },
    )
}

pub(crate) fn replace_spells(
    conn: &Connection,
    character_id: &str,
    spells: &[Spell],
    now: DateTime<Utc>,
) -> Result<()> {
    delete_owned(conn, "spells", character_id)?;
    for spell in spells {
        conn.execute(
            "INSERT INTO spells
                (id, character_id, name, level, school, casting_time, \"range\", components,
                 duration, prepared, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                row_id(&spell.id),
                character_id,
                spell.name,
                spell.level,
                spell.school,
                spell.casting_time,
                spell.range,
                spell.components,
                spell.duration,
                spell.prepared,
                spell.description,
                to_nanos(spell.created_at.unwrap_or(now))?,
            ],
        )
        .map_err(sql_error("insert_spell"))?;
    }
    Ok(())
}

pub(crate) fn load_spells(conn: &Connection, character_id: &str) -> Result<Vec<Spell>> {
    collect_rows(
        conn,
        "load_spells",
        "SELECT id, character_id, name, level, school, casting_time, \"range\", components,
                duration, prepared, description, created_at
         FROM spells WHERE character_id = ?1 ORDER BY level, name",
        character_id,
        |row| {
            Ok(Spell {
                id: Some(row.get(0)?),
                character_id: row.get(1)?,
                name: row.get(2)?,
                level: row.get(3)?,
                school: row.get(4)?,
                casting_time: row.get(5)?,
                range: row.get(6)?,
                components: row.get(7)?,
                duration: row.get(8)?,
                prepared: row.get(9)?,
                description: row.get(10)?,
                created_at: Some(from_nanos(row, 11)?),
            })
        },
    )
}

pub(crate) fn replace_attacks(
    conn: &Connection,
    character_id: &str,
    attacks: &[Attack],
    now: DateTime<Utc>,
) -> Result<()> {
    delete_owned(conn, "attacks", character_id)?;
    for attack in attacks {
        conn.execute(
            "INSERT INTO attacks
                (id, character_id, name, attack_bonus, damage, damage_type, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                row_id(&attack.id),
                character_id,
                attack.name,
                attack.attack_bonus,
                attack.damage,
                attack.damage_type,
                attack.notes,
                to_nanos(attack.created_at.unwrap_or(now))?,
            ],
        )
        .map_err(sql_error("insert_attack"))?;
    }
    Ok(())
}

pub(crate) fn load_attacks(conn: &Connection, character_id: &str) -> Result<Vec<Attack>> {
    collect_rows(
        conn,
        "load_attacks",
        "SELECT id, character_id, name, attack_bonus, damage, damage_type, notes, created_at
         FROM attacks WHERE character_id = ?1 ORDER BY created_at, rowid",
        character_id,
        |row| {
            Ok(Attack {
                id: Some(row.get(0)?),
                character_id: row.get(1)?,
                name: row.get(2)?,
                attack_bonus: row.get(3)?,
                damage: row.get(4)?,
                damage_type: row.get(5)?,
                notes: row.get(6)?,
                created_at: Some(from_nanos(row, 7)?),
            })
        },
    )
}

pub(crate) fn replace_features(
    conn: &Connection,
    character_id: &str,
    features: &[Feature],
    now: DateTime<Utc>,
) -> Result<()> {
    delete_owned(conn, "features", character_id)?;
    for feature in features {
        conn.execute(
            "INSERT INTO features (id, character_id, name, source, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row_id(&feature.id),
                character_id,
                feature.name,
                feature.source,
                feature.description,
                to_nanos(feature.created_at.unwrap_or(now))?,
            ],
        )
        .map_err(sql_error("insert_feature"))?;
    }
    Ok(())
}

pub(crate) fn load_features(conn: &Connection, character_id: &str) -> Result<Vec<Feature>> {
    collect_rows(
        conn,
        "load_features",
        "SELECT id, character_id, name, source, description, created_at
         FROM features WHERE character_id = ?1 ORDER BY created_at, rowid",
        character_id,
        |row| {
            Ok(Feature {
                id: Some(row.get(0)?),
                character_id: row.get(1)?,
                name: row.get(2)?,
                source: row.get(3)?,
                description: row.get(4)?,
                created_at: Some(from_nanos(row, 5)?),
            })
        },
    )
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Replace all skill assignments for the owner
///
/// Every written row gets `updated_at = now`.
pub(crate) fn replace_skills(
    conn: &Connection,
    character_id: &str,
    skills: &[SkillAssignment],
    now: DateTime<Utc>,
) -> Result<()> {
    delete_owned(conn, "character_skills", character_id)?;
    for skill in skills {
        conn.execute(
            "INSERT INTO character_skills
                (id, character_id, skill_id, proficiency, custom_modifier, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row_id(&skill.id),
                character_id,
                skill.skill_id,
                skill.proficiency.ordinal(),
                skill.custom_modifier,
                to_nanos(skill.created_at.unwrap_or(now))?,
                to_nanos(now)?,
            ],
        )
        .map_err(sql_error("insert_skill"))?;
    }
    Ok(())
}

/// Assignments joined with their catalog entries, by catalog key
pub(crate) fn load_skill_details(conn: &Connection, character_id: &str) -> Result<Vec<SkillDetail>> {
    collect_rows(
        conn,
        "load_skills",
        "SELECT cs.id, cs.character_id, cs.skill_id, s.name, s.ability, cs.proficiency,
                cs.custom_modifier, cs.created_at, cs.updated_at
         FROM character_skills cs
         JOIN skills s ON s.id = cs.skill_id
         WHERE cs.character_id = ?1
         ORDER BY cs.skill_id",
        character_id,
        |row| {
            Ok(SkillDetail {
                id: Some(row.get(0)?),
                character_id: row.get(1)?,
                skill_id: row.get(2)?,
                name: row.get(3)?,
                ability: ability(row, 4)?,
                proficiency: proficiency(row, 5)?,
                custom_modifier: row.get(6)?,
                created_at: Some(from_nanos(row, 7)?),
                updated_at: Some(from_nanos(row, 8)?),
            })
        },
    )
}

pub(crate) fn load_definitions(conn: &Connection) -> Result<Vec<SkillDefinition>> {
    let mut stmt = conn
        .prepare("SELECT id, name, ability FROM skills ORDER BY id")
        .map_err(sql_error("list_skill_definitions"))?;
    let definitions = stmt
        .query_map([], |row| {
            Ok(SkillDefinition {
                id: row.get(0)?,
                name: row.get(1)?,
                ability: ability(row, 2)?,
            })
        })
        .map_err(sql_error("list_skill_definitions"))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error("list_skill_definitions"))?;
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use sheetkeep_core::ExErrorKind;

    fn migrated() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn stored_character(conn: &Connection, name: &str) -> String {
        let mut character = Character::new(name);
        character.id = new_id();
        insert_character(conn, &character).unwrap()
    }

    #[test]
    fn test_insert_returns_given_id() {
        let conn = migrated();
        let mut character = Character::new("Bobby");
        character.id = "fixed-id".to_string();

        let id = insert_character(&conn, &character).unwrap();

        assert_eq!(id, "fixed-id");
        assert!(character_exists(&conn, "fixed-id").unwrap());
    }

    #[test]
    fn test_update_missing_row_reports_false() {
        let conn = migrated();
        let mut character = Character::new("Ghost");
        character.id = "missing".to_string();

        assert!(!update_character(&conn, &character).unwrap());
    }

    #[test]
    fn test_row_id_keeps_existing_and_fills_blank() {
        assert_eq!(row_id(&Some("a".to_string())), "a");
        assert!(!row_id(&None).is_empty());
        assert!(!row_id(&Some(String::new())).is_empty());
    }

    #[test]
    fn test_unknown_equip_state_is_serialization_error() {
        let conn = migrated();
        let id = stored_character(&conn, "Vex");
        conn.execute(
            "INSERT INTO items (id, character_id, name, equip_state, created_at)
             VALUES ('i1', ?1, 'Cursed ring', 9, 0)",
            [&id],
        )
        .unwrap();

        let err = load_items(&conn, &id).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_corrupt_spell_slots_is_serialization_error() {
        let conn = migrated();
        let id = stored_character(&conn, "Vex");
        conn.execute(
            "UPDATE characters SET spell_slots = 'not json' WHERE id = ?1",
            [&id],
        )
        .unwrap();

        let err = load_character(&conn, &id).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_timestamp_past_2262_is_rejected() {
        use chrono::TimeZone;

        let conn = migrated();
        let id = stored_character(&conn, "Timeless");
        let mut item = Item::new("Hourglass");
        item.created_at = Some(Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap());

        let err = replace_items(&conn, &id, &[item], Utc::now()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some("encode_timestamp"));
    }

    #[test]
    fn test_spells_order_by_level_then_name() {
        let conn = migrated();
        let id = stored_character(&conn, "Caster");
        let spells = vec![
            Spell::new("Shield", 1),
            Spell::new("Fire Bolt", 0),
            Spell::new("Magic Missile", 1),
        ];
        replace_spells(&conn, &id, &spells, Utc::now()).unwrap();

        let names: Vec<String> = load_spells(&conn, &id)
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Fire Bolt", "Magic Missile", "Shield"]);
    }

    #[test]
    fn test_catalog_has_eighteen_skills() {
        let conn = migrated();
        let definitions = load_definitions(&conn).unwrap();

        assert_eq!(definitions.len(), 18);
        assert_eq!(definitions[0].name, "Acrobatics");
        assert_eq!(definitions[3].ability, Ability::Strength);
    }
}
