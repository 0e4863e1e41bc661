//! Character sheet commands
//!
//! Sheets are exchanged as JSON in the shape of `CharacterSheet`. Missing
//! fields take their defaults, so a file holding only `{"character":
//! {"name": "Vex"}}` is a valid import.

use super::{open_store, CmdResult};
use clap::Args;
use sheetkeep_core::model::Ability;
use sheetkeep_core::rules::{ability_modifier, saving_throw_modifier, skill_modifier};
use sheetkeep_core::CharacterSheet;
use sheetkeep_core_types::RequestContext;
use sheetkeep_store::CharacterRepo;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Character name
    pub name: String,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Path to a JSON character sheet
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Character ID
    pub id: String,
}

fn repo(db_path: &Path) -> Result<CharacterRepo, Box<dyn std::error::Error>> {
    Ok(CharacterRepo::new(open_store(db_path)?))
}

fn read_sheet(path: &Path) -> Result<CharacterSheet, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let sheet = serde_json::from_str(&text)
        .map_err(|e| format!("invalid sheet in {}: {}", path.display(), e))?;
    Ok(sheet)
}

pub fn execute_new(db_path: &Path, args: NewArgs) -> CmdResult {
    if args.name.trim().is_empty() {
        return Err("character name must not be empty".into());
    }
    let id = repo(db_path)?.create_empty(&RequestContext::new(), &args.name)?;
    println!("{}", id);
    Ok(())
}

pub fn execute_import(db_path: &Path, args: FileArgs) -> CmdResult {
    let sheet = read_sheet(&args.path)?;
    let id = repo(db_path)?.create(&RequestContext::new(), &sheet)?;
    println!("{}", id);
    Ok(())
}

pub fn execute_apply(db_path: &Path, args: FileArgs) -> CmdResult {
    let sheet = read_sheet(&args.path)?;
    repo(db_path)?.update(&RequestContext::new(), &sheet)?;
    println!("Updated {}", sheet.id());
    Ok(())
}

pub fn execute_list(db_path: &Path) -> CmdResult {
    for summary in repo(db_path)?.list_summary(&RequestContext::new())? {
        println!("{}\t{}", summary.id, summary.name);
    }
    Ok(())
}

pub fn execute_show(db_path: &Path, args: IdArgs) -> CmdResult {
    let sheet = repo(db_path)?.get_by_id(&RequestContext::new(), &args.id)?;
    println!("{}", serde_json::to_string_pretty(&sheet)?);
    Ok(())
}

pub fn execute_delete(db_path: &Path, args: IdArgs) -> CmdResult {
    let repo = repo(db_path)?;
    let ctx = RequestContext::new();
    if !repo.exists(&ctx, &args.id)? {
        return Err(format!("no character with ID {}", args.id).into());
    }
    repo.delete(&ctx, &args.id)?;
    println!("Deleted {}", args.id);
    Ok(())
}

/// Print one line per ability, saving throw and skill
///
/// A sheet without stored scores or saves uses the defaults (all 10, no
/// proficiency).
pub fn execute_modifiers(db_path: &Path, args: IdArgs) -> CmdResult {
    let sheet = repo(db_path)?.get_by_id(&RequestContext::new(), &args.id)?;
    let scores = sheet.abilities.clone().unwrap_or_default();
    let saves = sheet.saving_throws.clone().unwrap_or_default();
    let bonus = sheet.character.proficiency_bonus;

    for ability in Ability::ALL {
        let score = scores.score(ability);
        println!(
            "{}\t{}\t{:+}\tsave {:+}",
            ability.code(),
            score,
            ability_modifier(score),
            saving_throw_modifier(&scores, &saves, ability, bonus)
        );
    }
    for skill in &sheet.skills {
        println!(
            "{}\t{}\t{:+}",
            skill.name,
            skill.ability.code(),
            skill_modifier(&scores, skill, bonus)
        );
    }

    Ok(())
}
