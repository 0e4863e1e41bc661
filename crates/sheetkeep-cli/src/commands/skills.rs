//! Skill catalog listing

use super::{open_store, CmdResult};
use sheetkeep_core_types::RequestContext;
use sheetkeep_store::SkillCatalog;
use std::path::Path;

pub fn execute(db_path: &Path) -> CmdResult {
    let catalog = SkillCatalog::new(open_store(db_path)?);

    for definition in catalog.list_definitions(&RequestContext::new())? {
        println!(
            "{}\t{}\t{}",
            definition.id,
            definition.name,
            definition.ability.code()
        );
    }

    Ok(())
}
