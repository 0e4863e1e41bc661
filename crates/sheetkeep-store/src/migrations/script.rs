//! Migration script parsing
//!
//! A script holds one up section and one down section, each introduced by
//! its own marker line:
//!
//! ```sql
//! -- +migrate Up
//! CREATE TABLE t (id INTEGER PRIMARY KEY);
//!
//! -- +migrate Down
//! DROP TABLE t;
//! ```
//!
//! Text before the first marker is ignored.

use thiserror::Error;

pub const UP_MARKER: &str = "-- +migrate Up";
pub const DOWN_MARKER: &str = "-- +migrate Down";

/// Reasons a script or its file name cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("missing up marker `-- +migrate Up`")]
    MissingUp,

    #[error("missing down marker `-- +migrate Down`")]
    MissingDown,

    #[error("marker `{0}` appears more than once")]
    DuplicateMarker(&'static str),

    #[error("file name `{0}` does not start with a version number")]
    BadFileName(String),
}

/// One parsed migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Ordering key, taken from the file name's leading digits
    pub version: i64,
    pub name: String,
    pub up: String,
    pub down: String,
}

impl Migration {
    /// Parse a script named like `0001_initial_schema.sql`
    ///
    /// ## Errors
    ///
    /// - `ScriptError::BadFileName`: no leading version digits
    /// - `ScriptError::MissingUp` / `MissingDown` / `DuplicateMarker`
    pub fn parse(file_name: &str, script: &str) -> Result<Self, ScriptError> {
        let (version, name) = parse_file_name(file_name)?;
        let (up, down) = split_sections(script)?;
        Ok(Self {
            version,
            name,
            up,
            down,
        })
    }

    /// Identifier used in errors and logs, e.g. `0001_initial_schema`
    pub fn label(&self) -> String {
        format!("{:04}_{}", self.version, self.name)
    }
}

fn parse_file_name(file_name: &str) -> Result<(i64, String), ScriptError> {
    let stem = file_name.strip_suffix(".sql").unwrap_or(file_name);
    let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    let version = digits
        .parse::<i64>()
        .map_err(|_| ScriptError::BadFileName(file_name.to_string()))?;
    let name = stem[digits.len()..].trim_start_matches(['_', '-']).to_string();
    Ok((version, name))
}

#[derive(Clone, Copy)]
enum Section {
    Preamble,
    Up,
    Down,
}

/// Extract the trimmed up and down sections
fn split_sections(script: &str) -> Result<(String, String), ScriptError> {
    let mut up: Option<String> = None;
    let mut down: Option<String> = None;
    let mut current = Section::Preamble;

    for line in script.lines() {
        match line.trim() {
            UP_MARKER => {
                if up.is_some() {
                    return Err(ScriptError::DuplicateMarker(UP_MARKER));
                }
                up = Some(String::new());
                current = Section::Up;
            }
            DOWN_MARKER => {
                if down.is_some() {
                    return Err(ScriptError::DuplicateMarker(DOWN_MARKER));
                }
                down = Some(String::new());
                current = Section::Down;
            }
            _ => {
                let target = match current {
                    Section::Preamble => None,
                    Section::Up => up.as_mut(),
                    Section::Down => down.as_mut(),
                };
                if let Some(buf) = target {
                    buf.push_str(line);
                    buf.push('\n');
                }
            }
        }
    }

    let up = up.ok_or(ScriptError::MissingUp)?;
    let down = down.ok_or(ScriptError::MissingDown)?;
    Ok((up.trim().to_string(), down.trim().to_string()))
}
