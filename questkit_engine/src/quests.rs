//! Built-in quest content.
//!
//! Each submodule exposes `quest_def()`, a constant `QuestDef` assembled in
//! code from the named id tables in [`crate::ids`].

pub mod enlightened_journey;

use anyhow::{Result, anyhow};
use questkit_data::QuestDef;

use crate::loader::build_quest;
use crate::quest::QuestHelper;
use crate::slug::sanitize_slug;

/// Every built-in quest definition.
pub fn all() -> Vec<QuestDef> {
    vec![enlightened_journey::quest_def()]
}

/// Find a built-in quest by display name or slug.
pub fn find(name_or_slug: &str) -> Option<QuestDef> {
    let wanted = sanitize_slug(name_or_slug);
    all()
        .into_iter()
        .find(|def| sanitize_slug(&def.quest.slug) == wanted || sanitize_slug(&def.quest.name) == wanted)
}

/// Validate and build a built-in quest.
///
/// # Errors
/// - if no built-in quest matches `name_or_slug`
/// - if the definition fails validation
pub fn load_builtin(name_or_slug: &str) -> Result<QuestHelper> {
    let def = find(name_or_slug).ok_or_else(|| anyhow!("no built-in quest named '{name_or_slug}'"))?;
    build_quest(&def)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_names_and_slugs() {
        assert!(find("enlightened-journey").is_some());
        assert!(find("Enlightened Journey").is_some());
        assert!(find("enlightened_journey").is_some());
        assert!(find("dragon slayer").is_none());
    }

    #[test]
    fn unknown_quest_is_an_error() {
        let err = load_builtin("nope").unwrap_err();
        assert!(err.to_string().contains("no built-in quest"));
    }
}
