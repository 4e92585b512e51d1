//! Game state -- module for the host-supplied view of the player's world.
//!
//! The engine never reads the game directly. Each refresh the host hands over
//! something implementing [`GameState`]; conditions and requirements are
//! evaluated against it and never mutate it.

use questkit_data::{ItemId, Skill, WorldPointDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tile coordinate in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

impl From<WorldPointDef> for WorldPoint {
    fn from(def: WorldPointDef) -> Self {
        Self::new(def.x, def.y, def.plane)
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}

/// Read-only queries the engine makes against live game state.
pub trait GameState {
    fn quest_progress(&self) -> u32;
    fn item_count(&self, item: ItemId) -> u32;
    fn position(&self) -> Option<WorldPoint>;
    fn widget_text(&self, group: u32, child: u32) -> Option<&str>;
    fn varbit(&self, varbit: u32) -> i32;
    fn skill_level(&self, skill: Skill) -> u32;
    fn quest_points(&self) -> u32;
}

/// Text currently shown by a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetText {
    pub group: u32,
    pub child: u32,
    pub text: String,
}

/// A captured copy of game state, loadable from RON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub inventory: BTreeMap<ItemId, u32>,
    #[serde(default)]
    pub position: Option<WorldPoint>,
    #[serde(default)]
    pub widgets: Vec<WidgetText>,
    #[serde(default)]
    pub varbits: BTreeMap<u32, i32>,
    #[serde(default)]
    pub skills: BTreeMap<Skill, u32>,
    #[serde(default)]
    pub quest_points: u32,
}

impl StateSnapshot {
    pub fn at_progress(progress: u32) -> Self {
        Self {
            progress,
            ..Self::default()
        }
    }

    /// Add `count` of an item to the inventory.
    pub fn give(&mut self, item: ItemId, count: u32) -> &mut Self {
        *self.inventory.entry(item).or_default() += count;
        self
    }

    /// Remove every copy of an item from the inventory.
    pub fn take_all(&mut self, item: ItemId) -> &mut Self {
        self.inventory.remove(&item);
        self
    }

    pub fn move_to(&mut self, point: WorldPoint) -> &mut Self {
        self.position = Some(point);
        self
    }

    /// Set (or replace) the text of a widget.
    pub fn show_widget(&mut self, group: u32, child: u32, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if let Some(existing) = self.widgets.iter_mut().find(|w| w.group == group && w.child == child) {
            existing.text = text;
        } else {
            self.widgets.push(WidgetText { group, child, text });
        }
        self
    }

    pub fn close_widget(&mut self, group: u32, child: u32) -> &mut Self {
        self.widgets.retain(|w| !(w.group == group && w.child == child));
        self
    }

    pub fn set_varbit(&mut self, varbit: u32, value: i32) -> &mut Self {
        self.varbits.insert(varbit, value);
        self
    }

    pub fn set_skill(&mut self, skill: Skill, level: u32) -> &mut Self {
        self.skills.insert(skill, level);
        self
    }
}

impl GameState for StateSnapshot {
    fn quest_progress(&self) -> u32 {
        self.progress
    }

    fn item_count(&self, item: ItemId) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    fn position(&self) -> Option<WorldPoint> {
        self.position
    }

    fn widget_text(&self, group: u32, child: u32) -> Option<&str> {
        self.widgets
            .iter()
            .find(|w| w.group == group && w.child == child)
            .map(|w| w.text.as_str())
    }

    fn varbit(&self, varbit: u32) -> i32 {
        self.varbits.get(&varbit).copied().unwrap_or(0)
    }

    // unlisted skills sit at the starting level
    fn skill_level(&self, skill: Skill) -> u32 {
        self.skills
            .get(&skill)
            .copied()
            .unwrap_or(if skill == Skill::Hitpoints { 10 } else { 1 })
    }

    fn quest_points(&self) -> u32 {
        self.quest_points
    }
}
