//! Helper configuration and loader.
//!
//! Display and resolution preferences live in `questkit.toml`. A missing or
//! malformed file is never fatal: the defaults below are used instead.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::session::ResolutionMode;

/// Preferences read from `questkit.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Whether conditional steps may regress to earlier branches.
    pub resolution: ResolutionMode,
    /// Show item tooltips under the item list.
    pub show_tooltips: bool,
    /// Show the dialogue options to pick.
    pub show_dialogue: bool,
    /// Wrap width for rendered panels; terminal width when absent.
    pub wrap_width: Option<usize>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionMode::Reactive,
            show_tooltips: true,
            show_dialogue: true,
            wrap_width: None,
        }
    }
}

/// Loads helper configuration from a TOML file, falling back to defaults on error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_config(toml_path: &Path) -> HelperConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("helper configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load helper configuration from '{}': {:#}. Using defaults.",
                toml_path.display(),
                e
            );
            HelperConfig::default()
        },
    }
}

/// Attempts to load helper configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
fn try_load_config(toml_path: &Path) -> Result<HelperConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading helper configuration from '{}'", toml_path.display()))?;
    parse_config(&text).with_context(|| format!("parsing helper configuration from '{}'", toml_path.display()))
}

/// Parse configuration text; unspecified keys keep their defaults.
///
/// # Errors
/// Returns an error on malformed TOML or unknown enum values.
pub fn parse_config(text: &str) -> Result<HelperConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), HelperConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = parse_config("resolution = \"forward-only\"\nwrap_width = 72\n").unwrap();
        assert_eq!(config.resolution, ResolutionMode::ForwardOnly);
        assert_eq!(config.wrap_width, Some(72));
        assert!(config.show_tooltips);
        assert!(config.show_dialogue);
    }

    #[test]
    fn unknown_resolution_is_rejected() {
        assert!(parse_config("resolution = \"sideways\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml"));
        assert_eq!(config, HelperConfig::default());
    }

    #[test]
    fn file_on_disk_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_tooltips = false").unwrap();
        let config = load_config(file.path());
        assert!(!config.show_tooltips);
        assert_eq!(config.resolution, ResolutionMode::Reactive);
    }
}
