//! Character sheet repository
//!
//! Maps a `CharacterSheet` to its normalized rows and back. Writes use a
//! replace strategy: every 1:1 extension and 1:N collection is deleted by
//! owner and re-inserted from the caller's value, inside one transaction.
//!
//! Every public operation:
//! - emits `log_op_start!` / `log_op_end!` / `log_op_error!` with the request ID
//! - checks the request context before each statement group and before commit
//! - attaches the request ID to any returned error

use crate::db::{ensure_active, Database};
use crate::errors::{character_not_found, invalid_input, Result};
use crate::repo::{rows, SkillCatalog};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use sheetkeep_core::model::{
    Character, CharacterSheet, CharacterSummary, SkillAssignment, SkillDetail,
};
use sheetkeep_core::{log_op_end, log_op_error, log_op_start};
use sheetkeep_core_types::RequestContext;
use std::sync::Arc;
use std::time::Instant;

/// Repository for whole character sheets
///
/// Cheap to clone; clones share the same database handle.
#[derive(Debug, Clone)]
pub struct CharacterRepo {
    db: Arc<Database>,
}

impl CharacterRepo {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a named character with empty collections and seeded skills
    ///
    /// Runs as two transactions: the root insert, then one untrained skill
    /// row per catalog entry. If seeding fails the root stays committed.
    ///
    /// ## Errors
    ///
    /// - `Cancelled`: `ctx` was cancelled before either commit
    /// - `Transaction`: an insert failed
    pub fn create_empty(&self, ctx: &RequestContext, name: &str) -> Result<String> {
        self.instrumented(ctx, "create_empty", None, || {
            let now = Utc::now();
            let mut character = Character::new(name);
            character.id = rows::new_id();
            character.created_at = now;
            character.updated_at = now;
            character.normalize_spell_slots();

            let id = self.db.transaction(ctx, "create_empty", |tx| {
                rows::insert_character(tx, &character)
            })?;

            self.db.transaction(ctx, "seed_skills", |tx| {
                let seeds: Vec<SkillAssignment> = SkillCatalog::definitions_on(tx)?
                    .iter()
                    .map(|definition| SkillAssignment::seed(id.as_str(), definition))
                    .collect();
                ensure_active(ctx, "seed_skills")?;
                rows::replace_skills(tx, &id, &seeds, now)
            })?;

            tracing::debug!(character_id = %id, "Seeded skills for new character");
            Ok(id)
        })
    }

    /// Insert a complete sheet in one transaction
    ///
    /// The root keeps its ID when one is set, otherwise gets a fresh one.
    /// Extensions and collections are written only when present.
    ///
    /// ## Errors
    ///
    /// - `Cancelled`: `ctx` was cancelled before commit
    /// - `Transaction`: any write failed; nothing is kept
    pub fn create(&self, ctx: &RequestContext, sheet: &CharacterSheet) -> Result<String> {
        self.instrumented(ctx, "create", None, || {
            let now = Utc::now();
            let mut character = sheet.character.clone();
            if !character.has_id() {
                character.id = rows::new_id();
            }
            character.created_at = now;
            character.updated_at = now;
            character.normalize_spell_slots();

            self.db.transaction(ctx, "create", |tx| {
                let id = rows::insert_character(tx, &character)?;
                write_relations(ctx, tx, "create", &id, sheet, now, WriteMode::Insert)?;
                Ok(id)
            })
        })
    }

    /// Reconstruct a sheet from its rows
    ///
    /// Missing extensions read as `None` and missing collections as empty.
    /// The reads are not wrapped in a transaction.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no character has this ID
    /// - `Serialization`: a stored value could not be decoded
    /// - `Cancelled`: `ctx` was cancelled between reads
    pub fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<CharacterSheet> {
        self.instrumented(ctx, "get_by_id", Some(id), || {
            self.db.with_conn(|conn| load_sheet(ctx, conn, id))
        })
    }

    /// Replace the stored sheet with `sheet`
    ///
    /// Overwrites the root, then deletes and re-inserts every extension and
    /// collection. Rows without an ID get a fresh one.
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: the root has no ID
    /// - `NotFound`: no character has this ID
    /// - `Cancelled`: `ctx` was cancelled before commit
    /// - `Transaction`: any write failed; the prior state is kept
    pub fn update(&self, ctx: &RequestContext, sheet: &CharacterSheet) -> Result<()> {
        let id = sheet.id();
        self.instrumented(ctx, "update", Some(id), || {
            if !sheet.character.has_id() {
                return Err(invalid_input("update", "character sheet has no ID"));
            }

            let now = Utc::now();
            let mut character = sheet.character.clone();
            character.updated_at = now;
            character.normalize_spell_slots();

            self.db.transaction(ctx, "update", |tx| {
                if !rows::update_character(tx, &character)? {
                    return Err(character_not_found("update", id));
                }
                write_relations(ctx, tx, "update", id, sheet, now, WriteMode::Replace)
            })
        })
    }

    /// ID and name of every character, ordered by name
    ///
    /// ## Errors
    ///
    /// - `Transaction`: the query failed
    pub fn list_summary(&self, ctx: &RequestContext) -> Result<Vec<CharacterSummary>> {
        self.instrumented(ctx, "list_summary", None, || {
            self.db.with_conn(|conn| {
                ensure_active(ctx, "list_summary")?;
                rows::list_summaries(conn)
            })
        })
    }

    /// Delete a character and everything it owns
    ///
    /// Owned rows go in one transaction and the root in a second. Deleting
    /// an unknown ID succeeds.
    ///
    /// ## Errors
    ///
    /// - `Cancelled`: `ctx` was cancelled before a commit
    /// - `Transaction`: a delete failed
    pub fn delete(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        self.instrumented(ctx, "delete", Some(id), || {
            self.db.transaction(ctx, "delete_owned", |tx| {
                for table in rows::OWNED_TABLES {
                    rows::delete_owned(tx, table, id)?;
                }
                Ok(())
            })?;

            self.db
                .transaction(ctx, "delete_root", |tx| rows::delete_character(tx, id))
        })
    }

    /// Whether a character with this ID is stored
    ///
    /// ## Errors
    ///
    /// - `Transaction`: the query failed
    pub fn exists(&self, ctx: &RequestContext, id: &str) -> Result<bool> {
        self.instrumented(ctx, "exists", Some(id), || {
            self.db.with_conn(|conn| {
                ensure_active(ctx, "exists")?;
                rows::character_exists(conn, id)
            })
        })
    }

    /// Wrap one public operation with lifecycle logging and error context
    fn instrumented<T>(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        entity_id: Option<&str>,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        log_op_start!(op, request_id = ctx.request_id.as_str());
        let start = Instant::now();

        match f() {
            Ok(value) => {
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str()
                );
                Ok(value)
            }
            Err(err) => {
                let mut err = err.with_request_id(ctx.request_id.clone());
                if let Some(id) =
                    entity_id.filter(|id| !id.is_empty() && err.entity_id().is_none())
                {
                    err = err.with_entity_id(id);
                }
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str()
                );
                Err(err)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Fresh root: skip relations that are absent or empty
    Insert,
    /// Existing root: clear every relation before writing
    Replace,
}

/// Write every extension and collection of `sheet` under owner `id`
fn write_relations(
    ctx: &RequestContext,
    conn: &Connection,
    op: &str,
    id: &str,
    sheet: &CharacterSheet,
    now: DateTime<Utc>,
    mode: WriteMode,
) -> Result<()> {
    let replace = mode == WriteMode::Replace;

    if replace || sheet.abilities.is_some() {
        ensure_active(ctx, op)?;
        rows::replace_abilities(conn, id, sheet.abilities.as_ref())?;
    }
    if replace || sheet.saving_throws.is_some() {
        ensure_active(ctx, op)?;
        rows::replace_saving_throws(conn, id, sheet.saving_throws.as_ref())?;
    }
    if replace || sheet.wallet.is_some() {
        ensure_active(ctx, op)?;
        rows::replace_wallet(conn, id, sheet.wallet.as_ref())?;
    }
    if replace || !sheet.items.is_empty() {
        ensure_active(ctx, op)?;
        rows::replace_items(conn, id, &sheet.items, now)?;
    }
    if replace || !sheet.spells.is_empty() {
        ensure_active(ctx, op)?;
        rows::replace_spells(conn, id, &sheet.spells, now)?;
    }
    if replace || !sheet.attacks.is_empty() {
        ensure_active(ctx, op)?;
        rows::replace_attacks(conn, id, &sheet.attacks, now)?;
    }
    if replace || !sheet.features.is_empty() {
        ensure_active(ctx, op)?;
        rows::replace_features(conn, id, &sheet.features, now)?;
    }
    if replace || !sheet.skills.is_empty() {
        ensure_active(ctx, op)?;
        let assignments: Vec<SkillAssignment> =
            sheet.skills.iter().map(SkillDetail::to_assignment).collect();
        rows::replace_skills(conn, id, &assignments, now)?;
    }

    Ok(())
}

fn load_sheet(ctx: &RequestContext, conn: &Connection, id: &str) -> Result<CharacterSheet> {
    const OP: &str = "get_by_id";

    ensure_active(ctx, OP)?;
    let character =
        rows::load_character(conn, id)?.ok_or_else(|| character_not_found(OP, id))?;

    ensure_active(ctx, OP)?;
    let abilities = rows::load_abilities(conn, id)?;
    let saving_throws = rows::load_saving_throws(conn, id)?;
    let wallet = rows::load_wallet(conn, id)?;

    ensure_active(ctx, OP)?;
    let items = rows::load_items(conn, id)?;
    let spells = rows::load_spells(conn, id)?;
    let attacks = rows::load_attacks(conn, id)?;
    let features = rows::load_features(conn, id)?;
    let skills = rows::load_skill_details(conn, id)?;

    Ok(CharacterSheet {
        character,
        abilities,
        saving_throws,
        wallet,
        items,
        spells,
        attacks,
        features,
        skills,
    })
}
