#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const QUESTKIT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod condition;
pub mod config;
pub mod data_paths;
pub mod ids;
pub mod loader;
pub mod quest;
pub mod quests;
pub mod requirement;
pub mod session;
pub mod slug;
pub mod state;
pub mod step;
pub mod style;
pub mod view;

// Re-exports for convenience
pub use condition::{Condition, LogicType, Zone};
pub use config::{HelperConfig, load_config};
pub use loader::{build_quest, load_quest};
pub use quest::{Panel, QuestHelper, ResolveError, Resolution};
pub use requirement::{GeneralRequirement, ItemRequirement};
pub use session::{QuestSession, ResolutionMode};
pub use state::{GameState, StateSnapshot, WorldPoint};
pub use step::{ConditionalStep, QuestStep, StepKind, StepNode};
pub use view::PanelView;
