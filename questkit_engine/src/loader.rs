//! Loader utilities for building a `QuestHelper` from serialized data.
//!
//! Quest content arrives as a `QuestDef` (built in code or read from RON),
//! is validated as a whole, and is then converted into runtime structures.
//! Host-state snapshots are RON as well.

pub mod questdef;
pub mod state;

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use questkit_data::QuestDef;

use crate::loader::questdef::{load_questdef, quest_from_def};
use crate::quest::QuestHelper;

/// Load and build a quest from a RON `QuestDef` file.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or failed validation.
pub fn load_quest(path: &Path) -> Result<QuestHelper> {
    let def = load_questdef(path).context("while loading questdef from file")?;
    build_quest(&def)
}

/// Validate a `QuestDef` and convert it into a `QuestHelper`.
///
/// # Errors
/// - if validation reports any problem (all problems are listed)
/// - if conversion hits a reference validation did not cover
pub fn build_quest(def: &QuestDef) -> Result<QuestHelper> {
    validate_questdef(def)?;
    let quest = quest_from_def(def).with_context(|| format!("while building quest '{}'", def.quest.name))?;
    info!(
        "quest '{}' built: {} checkpoints, {} step nodes, {} panels",
        quest.name,
        quest.steps().len(),
        quest.nodes.len(),
        quest.panels().len()
    );
    Ok(quest)
}

/// Validate the QuestDef and return a single aggregated error.
fn validate_questdef(def: &QuestDef) -> Result<()> {
    let errors = questkit_data::validate_quest(def);
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .into_iter()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("questdef '{}' validation failed:\n{details}", def.quest.name);
}
