//! Requirement module --
//!
//! Item requirements (what the player must carry) and general requirements
//! (quest points and skill levels) as checked against host state.

use std::fmt;

use questkit_data::{GeneralRequirementDef, Id, ItemId, ItemRequirementDef, Skill};

use crate::state::GameState;

/// An item the player must (or should) hold, with acceptable substitutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequirement {
    pub key: Id,
    pub name: String,
    pub item: ItemId,
    pub alternates: Vec<ItemId>,
    pub quantity: u32,
    pub tooltip: Option<String>,
    pub highlighted: bool,
}

impl ItemRequirement {
    pub fn new(key: impl Into<Id>, name: impl Into<String>, item: ItemId, quantity: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            item,
            alternates: Vec::new(),
            quantity,
            tooltip: None,
            highlighted: false,
        }
    }

    pub fn from_def(def: &ItemRequirementDef) -> Self {
        Self {
            key: def.id.clone(),
            name: def.name.clone(),
            item: def.item,
            alternates: def.alternates.clone(),
            quantity: def.quantity,
            tooltip: def.tooltip.clone(),
            highlighted: false,
        }
    }

    /// Copy of this requirement flagged for highlighted rendering.
    pub fn highlighted(&self) -> Self {
        Self {
            highlighted: true,
            ..self.clone()
        }
    }

    /// Primary id followed by alternates, in checking order.
    pub fn all_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        std::iter::once(self.item).chain(self.alternates.iter().copied())
    }

    /// First id (primary, then alternates) the player holds in the required quantity.
    pub fn satisfied_by(&self, state: &dyn GameState) -> Option<ItemId> {
        self.all_ids().find(|id| state.item_count(*id) >= self.quantity)
    }

    pub fn is_satisfied(&self, state: &dyn GameState) -> bool {
        self.satisfied_by(state).is_some()
    }

    /// Largest stack of any acceptable id, for "2/3"-style progress display.
    pub fn best_count(&self, state: &dyn GameState) -> u32 {
        self.all_ids().map(|id| state.item_count(id)).max().unwrap_or(0)
    }
}

impl fmt::Display for ItemRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity > 1 {
            write!(f, "{} x {}", self.quantity, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Quest point and skill prerequisites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralRequirement {
    QuestPoints { points: u32 },
    Skill { skill: Skill, level: u32, recommended: bool },
}

impl GeneralRequirement {
    pub fn from_def(def: &GeneralRequirementDef) -> Self {
        match def {
            GeneralRequirementDef::QuestPoints { points } => Self::QuestPoints { points: *points },
            GeneralRequirementDef::Skill {
                skill,
                level,
                recommended,
            } => Self::Skill {
                skill: *skill,
                level: *level,
                recommended: *recommended,
            },
        }
    }

    pub fn is_met(&self, state: &dyn GameState) -> bool {
        match self {
            Self::QuestPoints { points } => state.quest_points() >= *points,
            Self::Skill { skill, level, .. } => state.skill_level(*skill) >= *level,
        }
    }

    /// Recommended requirements never block the quest.
    pub fn is_recommended(&self) -> bool {
        matches!(self, Self::Skill { recommended: true, .. })
    }
}

impl fmt::Display for GeneralRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestPoints { points } => write!(f, "{points} Quest points"),
            Self::Skill {
                skill,
                level,
                recommended,
            } => {
                write!(f, "Level {level} {skill}")?;
                if *recommended {
                    write!(f, " (recommended)")?;
                }
                Ok(())
            },
        }
    }
}
