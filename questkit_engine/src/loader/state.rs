//! module `loader::state`

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;

use crate::state::StateSnapshot;

/// Load a host-state snapshot from a RON file.
/// # Errors
/// - on failed read of the file at `path`
/// - on error parsing the file
pub fn load_state(path: &Path) -> Result<StateSnapshot> {
    let text = fs::read_to_string(path).with_context(|| format!("reading state snapshot from '{}'", path.display()))?;
    let state: StateSnapshot =
        ron::from_str(&text).with_context(|| format!("parsing state snapshot RON from '{}'", path.display()))?;
    info!(
        "state snapshot loaded from '{}': progress {}, {} inventory entries",
        path.display(),
        state.progress,
        state.inventory.len()
    );
    Ok(state)
}
