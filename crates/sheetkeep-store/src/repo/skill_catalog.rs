//! Read-only access to the skill catalog

use crate::db::{ensure_active, Database};
use crate::errors::Result;
use crate::repo::rows;
use rusqlite::Connection;
use sheetkeep_core::model::SkillDefinition;
use sheetkeep_core::{log_op_end, log_op_error, log_op_start};
use sheetkeep_core_types::RequestContext;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SkillCatalog {
    db: Arc<Database>,
}

impl SkillCatalog {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Catalog read on a borrowed connection, also used to seed new characters
    pub(crate) fn definitions_on(conn: &Connection) -> Result<Vec<SkillDefinition>> {
        rows::load_definitions(conn)
    }

    /// All skill definitions, ordered by catalog key
    ///
    /// ## Errors
    ///
    /// - `Cancelled`: `ctx` was already cancelled
    /// - `Serialization`: a stored ability code is unknown
    /// - `Transaction`: the query failed
    pub fn list_definitions(&self, ctx: &RequestContext) -> Result<Vec<SkillDefinition>> {
        log_op_start!("list_definitions", request_id = ctx.request_id.as_str());
        let start = Instant::now();

        let result = self
            .db
            .with_conn(|conn| {
                ensure_active(ctx, "list_definitions")?;
                Self::definitions_on(conn)
            })
            .map_err(|e| {
                let e = e.with_request_id(ctx.request_id.clone());
                log_op_error!(
                    "list_definitions",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str()
                );
                e
            })?;

        log_op_end!(
            "list_definitions",
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            count = result.len()
        );

        Ok(result)
    }
}
