use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier used across QuestDef references.
pub type Id = String;

/// Game item id as reported by the host client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Game NPC id as reported by the host client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub u32);

/// Scenery object id as reported by the host client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc#{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Top-level quest guidance data consumed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuestDef {
    pub quest: QuestMetaDef,
    #[serde(default)]
    pub items: Vec<ItemRequirementDef>,
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub conditions: Vec<NamedConditionDef>,
    #[serde(default)]
    pub steps: Vec<StepDef>,
    #[serde(default)]
    pub conditional_steps: Vec<ConditionalStepDef>,
    /// Quest-progress checkpoint -> step or conditional step key.
    #[serde(default)]
    pub step_map: BTreeMap<u32, Id>,
    #[serde(default)]
    pub required_items: Vec<Id>,
    #[serde(default)]
    pub recommended_items: Vec<Id>,
    #[serde(default)]
    pub general_requirements: Vec<GeneralRequirementDef>,
    #[serde(default)]
    pub panels: Vec<PanelDef>,
}

/// Display metadata and the published progress range of a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestMetaDef {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default = "default_max_progress")]
    pub max_progress: u32,
}

impl Default for QuestMetaDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            max_progress: default_max_progress(),
        }
    }
}

fn default_max_progress() -> u32 {
    100
}

fn default_quantity() -> u32 {
    1
}

/// An item the player must (or should) hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequirementDef {
    pub id: Id,
    pub name: String,
    pub item: ItemId,
    /// Functionally equivalent items, checked in order after the primary id.
    #[serde(default)]
    pub alternates: Vec<ItemId>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub tooltip: Option<String>,
}

/// Reference from a step to an item requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRefDef {
    pub item: Id,
    #[serde(default)]
    pub highlighted: bool,
}

impl ItemRefDef {
    pub fn plain(item: impl Into<Id>) -> Self {
        Self {
            item: item.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(item: impl Into<Id>) -> Self {
        Self {
            item: item.into(),
            highlighted: true,
        }
    }
}

/// Tile coordinate in the game world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPointDef {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPointDef {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

/// Rectangular area spanning one or more planes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: Id,
    pub min: WorldPointDef,
    pub max: WorldPointDef,
}

/// A condition declared once and referenced by key from conditional branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedConditionDef {
    pub id: Id,
    pub condition: ConditionExpr,
}

/// Boolean expression tree over host-supplied state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionExpr {
    All(Vec<ConditionExpr>),
    Any(Vec<ConditionExpr>),
    Pred(ConditionDef),
}

impl Default for ConditionExpr {
    fn default() -> Self {
        ConditionExpr::All(Vec::new())
    }
}

/// Leaf predicates used by ConditionExpr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionDef {
    InZone { zone: Id },
    HasItem { item: Id },
    WidgetText { group: u32, child: u32, text: String },
    Varbit { varbit: u32, value: i32 },
}

/// A single instruction shown to the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDef {
    pub id: Id,
    pub kind: StepKindDef,
    pub description: String,
    pub location: Option<WorldPointDef>,
    #[serde(default)]
    pub items: Vec<ItemRefDef>,
    /// Dialogue options to auto-select, in the order they appear.
    #[serde(default)]
    pub dialogue: Vec<String>,
    pub icon: Option<ItemId>,
}

/// What the player acts on in a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKindDef {
    Npc { npc: NpcId, name: String },
    Object { object: ObjectId, name: String },
    Detailed,
    Puzzle { instructions: Vec<String> },
}

/// Branch point choosing the first step whose condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalStepDef {
    pub id: Id,
    pub default: Id,
    #[serde(default)]
    pub branches: Vec<BranchDef>,
}

/// One `(condition, step)` entry of a conditional step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDef {
    pub condition: Id,
    pub step: Id,
}

/// Quest point and skill prerequisites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneralRequirementDef {
    QuestPoints {
        points: u32,
    },
    Skill {
        skill: Skill,
        level: u32,
        #[serde(default)]
        recommended: bool,
    },
}

/// Display grouping of steps and the items they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelDef {
    pub label: String,
    #[serde(default)]
    pub steps: Vec<Id>,
    #[serde(default)]
    pub items: Vec<Id>,
}

/// Player skills that can gate a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecraft,
    Hunter,
    Construction,
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Skill::Attack => "Attack",
            Skill::Defence => "Defence",
            Skill::Strength => "Strength",
            Skill::Hitpoints => "Hitpoints",
            Skill::Ranged => "Ranged",
            Skill::Prayer => "Prayer",
            Skill::Magic => "Magic",
            Skill::Cooking => "Cooking",
            Skill::Woodcutting => "Woodcutting",
            Skill::Fletching => "Fletching",
            Skill::Fishing => "Fishing",
            Skill::Firemaking => "Firemaking",
            Skill::Crafting => "Crafting",
            Skill::Smithing => "Smithing",
            Skill::Mining => "Mining",
            Skill::Herblore => "Herblore",
            Skill::Agility => "Agility",
            Skill::Thieving => "Thieving",
            Skill::Slayer => "Slayer",
            Skill::Farming => "Farming",
            Skill::Runecraft => "Runecraft",
            Skill::Hunter => "Hunter",
            Skill::Construction => "Construction",
        };
        f.write_str(name)
    }
}
