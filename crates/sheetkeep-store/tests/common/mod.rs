// Shared helpers for sheetkeep-store integration tests

#![allow(dead_code)]

use rusqlite::Connection;
use sheetkeep_core::model::{
    Ability, AbilityScores, Attack, CharacterSheet, EquipState, Feature, Item, ProficiencyLevel,
    SavingThrows, Spell, Wallet,
};
use sheetkeep_store::migrations::apply_migrations;
use sheetkeep_store::{CharacterRepo, Database, DbConfig, SkillCatalog};
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory database with all migrations applied
pub fn migrated_db() -> Arc<Database> {
    let db = Database::open_in_memory().expect("open in-memory database");
    db.with_conn(apply_migrations).expect("apply migrations");
    Arc::new(db)
}

/// On-disk database in a fresh temp dir; keep the `TempDir` alive
pub fn migrated_file_db() -> (TempDir, Arc<Database>) {
    let dir = TempDir::new().expect("create temp dir");
    let db = Database::open(dir.path().join("sheets.db"), &DbConfig::default())
        .expect("open file database");
    db.with_conn(apply_migrations).expect("apply migrations");
    (dir, Arc::new(db))
}

pub fn repo() -> CharacterRepo {
    CharacterRepo::new(migrated_db())
}

pub fn repo_and_catalog() -> (CharacterRepo, SkillCatalog) {
    let db = migrated_db();
    (CharacterRepo::new(db.clone()), SkillCatalog::new(db))
}

/// Count rows in `table` owned by `character_id`
pub fn owned_rows(db: &Database, table: &str, character_id: &str) -> i64 {
    db.with_conn(|conn: &mut Connection| {
        Ok(conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {table} WHERE character_id = ?1"),
                [character_id],
                |row| row.get(0),
            )
            .expect("count rows"))
    })
    .expect("lend connection")
}

/// A sheet with every relation populated
pub fn full_sheet(name: &str) -> CharacterSheet {
    let mut sheet = CharacterSheet::new(name);
    sheet.character.class_name = "Wizard".to_string();
    sheet.character.race = "Elf".to_string();
    sheet.character.level = 5;
    sheet.character.proficiency_bonus = 3;
    sheet.character.max_hp = 27;
    sheet.character.current_hp = 22;
    sheet.character.hit_dice = "5d6".to_string();
    sheet.character.spellcasting_ability = Some(Ability::Intelligence);
    sheet.character.spell_slots = vec![0, 4, 3, 2, 0, 0, 0, 0, 0, 0];
    sheet.character.spell_slots_used = vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
    sheet.character.ideals = "Knowledge".to_string();

    sheet.abilities = Some(AbilityScores {
        strength: 8,
        dexterity: 14,
        constitution: 13,
        intelligence: 18,
        wisdom: 12,
        charisma: 10,
        ..AbilityScores::default()
    });
    sheet.saving_throws = Some(SavingThrows {
        intelligence: ProficiencyLevel::Proficient,
        wisdom: ProficiencyLevel::Proficient,
        ..SavingThrows::default()
    });
    sheet.wallet = Some(Wallet {
        gold: 42,
        silver: 7,
        ..Wallet::default()
    });

    let mut staff = Item::new("Quarterstaff");
    staff.weight = 4.0;
    staff.equip_state = EquipState::Equipped;
    let mut book = Item::new("Spellbook");
    book.weight = 3.0;
    sheet.items = vec![staff, book];

    let mut missile = Spell::new("Magic Missile", 1);
    missile.prepared = true;
    missile.range = "120 feet".to_string();
    sheet.spells = vec![missile, Spell::new("Fire Bolt", 0)];

    let mut attack = Attack::new("Quarterstaff", 2, "1d6-1");
    attack.damage_type = "bludgeoning".to_string();
    sheet.attacks = vec![attack];

    sheet.features = vec![Feature::new("Arcane Recovery", "Wizard 1")];
    sheet
}

/// Copy with every store-assigned value cleared, for content comparison
pub fn content_of(sheet: &CharacterSheet) -> CharacterSheet {
    let mut sheet = sheet.clone();
    let epoch = chrono::DateTime::<chrono::Utc>::default();

    sheet.character.id.clear();
    sheet.character.created_at = epoch;
    sheet.character.updated_at = epoch;
    if let Some(a) = sheet.abilities.as_mut() {
        a.character_id.clear();
    }
    if let Some(s) = sheet.saving_throws.as_mut() {
        s.character_id.clear();
    }
    if let Some(w) = sheet.wallet.as_mut() {
        w.character_id.clear();
    }
    for item in &mut sheet.items {
        item.id = None;
        item.character_id.clear();
        item.created_at = None;
    }
    for spell in &mut sheet.spells {
        spell.id = None;
        spell.character_id.clear();
        spell.created_at = None;
    }
    for attack in &mut sheet.attacks {
        attack.id = None;
        attack.character_id.clear();
        attack.created_at = None;
    }
    for feature in &mut sheet.features {
        feature.id = None;
        feature.character_id.clear();
        feature.created_at = None;
    }
    for skill in &mut sheet.skills {
        skill.id = None;
        skill.character_id.clear();
        skill.created_at = None;
        skill.updated_at = None;
    }
    sheet
}
