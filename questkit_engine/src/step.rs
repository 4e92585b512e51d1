//! Step module --
//!
//! A `QuestStep` is one instruction shown to the player. A `ConditionalStep`
//! picks among several steps depending on host state. Both live in the quest's
//! node table as a `StepNode`.

use questkit_data::{Id, ItemId, NpcId, ObjectId};
use variantly::Variantly;

use crate::condition::Condition;
use crate::requirement::ItemRequirement;
use crate::state::{GameState, WorldPoint};

/// What the player acts on in a step.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum StepKind {
    Npc { npc: NpcId, name: String },
    Object { object: ObjectId, name: String },
    /// Free-text instruction, e.g. using one item on another.
    Detailed,
    /// Custom puzzle guidance with ordered sub-instructions.
    Puzzle { instructions: Vec<String> },
}

impl StepKind {
    /// Short imperative for panel headings.
    pub fn verb(&self) -> &'static str {
        match self {
            StepKind::Npc { .. } => "Talk to",
            StepKind::Object { .. } => "Interact with",
            StepKind::Detailed => "Do",
            StepKind::Puzzle { .. } => "Solve",
        }
    }

    pub fn target_label(&self) -> Option<&str> {
        match self {
            StepKind::Npc { name, .. } | StepKind::Object { name, .. } => Some(name),
            StepKind::Detailed | StepKind::Puzzle { .. } => None,
        }
    }
}

/// A single instruction shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestStep {
    pub key: Id,
    pub kind: StepKind,
    pub description: String,
    pub location: Option<WorldPoint>,
    pub items: Vec<ItemRequirement>,
    pub dialogue: Vec<String>,
    pub icon: Option<ItemId>,
}

impl QuestStep {
    /// One-line summary: verb, target and location when known.
    pub fn describe(&self) -> String {
        let mut line = match self.kind.target_label() {
            Some(target) => format!("{} {}", self.kind.verb(), target),
            None => self.kind.verb().to_string(),
        };
        if let Some(point) = self.location {
            line.push_str(&format!(" at {point}"));
        }
        line
    }

    pub fn highlighted_items(&self) -> impl Iterator<Item = &ItemRequirement> {
        self.items.iter().filter(|i| i.highlighted)
    }

    /// Items this step needs that the player does not currently hold.
    pub fn missing_items(&self, state: &dyn GameState) -> Vec<&ItemRequirement> {
        self.items.iter().filter(|i| !i.is_satisfied(state)).collect()
    }
}

/// One `(condition, step)` entry of a conditional step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub condition: Condition,
    pub step: Id,
}

/// Branch point dispatching to the first step whose condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalStep {
    pub key: Id,
    pub default: Id,
    pub branches: Vec<Branch>,
}

impl ConditionalStep {
    /// Index of the first branch whose condition holds, or `None` for the default.
    pub fn select(&self, state: &dyn GameState) -> Option<usize> {
        self.branches.iter().position(|b| b.condition.is_met(state))
    }

    /// Step key for a selection made by [`ConditionalStep::select`].
    pub fn target(&self, selection: Option<usize>) -> &Id {
        selection
            .and_then(|i| self.branches.get(i))
            .map_or(&self.default, |b| &b.step)
    }

    /// Progression rank of a selection: the default ranks lowest and earlier
    /// branches rank higher than later ones.
    pub fn rank(&self, selection: Option<usize>) -> usize {
        selection.map_or(0, |i| self.branches.len().saturating_sub(i))
    }

    /// Inverse of [`ConditionalStep::rank`].
    pub fn selection_for_rank(&self, rank: usize) -> Option<usize> {
        if rank == 0 || rank > self.branches.len() {
            None
        } else {
            Some(self.branches.len() - rank)
        }
    }
}

/// Entry in the quest's node table.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum StepNode {
    Step(QuestStep),
    Conditional(ConditionalStep),
}

impl StepNode {
    pub fn key(&self) -> &Id {
        match self {
            StepNode::Step(step) => &step.key,
            StepNode::Conditional(cond) => &cond.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateSnapshot;

    fn talk(key: &str) -> QuestStep {
        QuestStep {
            key: key.into(),
            kind: StepKind::Npc {
                npc: NpcId(1176),
                name: "Auguste".into(),
            },
            description: "Talk to Auguste.".into(),
            location: Some(WorldPoint::new(2809, 3354, 0)),
            items: vec![ItemRequirement::new("papyrus", "Papyrus", ItemId(970), 3)],
            dialogue: vec!["Yes.".into()],
            icon: None,
        }
    }

    fn prototype() -> ConditionalStep {
        ConditionalStep {
            key: "making_prototype".into(),
            default: "use_papyrus_on_wool".into(),
            branches: vec![
                Branch {
                    condition: Condition::HasItem(ItemRequirement::new(
                        "origami_balloon",
                        "Origami balloon",
                        ItemId(9934),
                        1,
                    )),
                    step: "talk_to_auguste_again".into(),
                },
                Branch {
                    condition: Condition::HasItem(ItemRequirement::new(
                        "balloon_structure",
                        "Balloon structure",
                        ItemId(9933),
                        1,
                    )),
                    step: "use_candle_on_balloon".into(),
                },
            ],
        }
    }

    #[test]
    fn describe_includes_target_and_location() {
        assert_eq!(talk("t").describe(), "Talk to Auguste at (2809, 3354, 0)");
    }

    #[test]
    fn detailed_steps_have_no_target() {
        let mut step = talk("t");
        step.kind = StepKind::Detailed;
        step.location = None;
        assert_eq!(step.describe(), "Do");
        assert!(step.kind.is_detailed());
    }

    #[test]
    fn missing_items_lists_unsatisfied_only() {
        let step = talk("t");
        let mut state = StateSnapshot::default();
        assert_eq!(step.missing_items(&state).len(), 1);
        state.give(ItemId(970), 3);
        assert!(step.missing_items(&state).is_empty());
    }

    #[test]
    fn select_falls_back_to_default() {
        let cond = prototype();
        let state = StateSnapshot::default();
        let selection = cond.select(&state);
        assert_eq!(selection, None);
        assert_eq!(cond.target(selection), "use_papyrus_on_wool");
    }

    #[test]
    fn earlier_branch_wins_when_both_hold() {
        let cond = prototype();
        let mut state = StateSnapshot::default();
        state.give(ItemId(9933), 1).give(ItemId(9934), 1);
        let selection = cond.select(&state);
        assert_eq!(selection, Some(0));
        assert_eq!(cond.target(selection), "talk_to_auguste_again");
    }

    #[test]
    fn rank_round_trips() {
        let cond = prototype();
        assert_eq!(cond.rank(None), 0);
        assert_eq!(cond.rank(Some(0)), 2);
        assert_eq!(cond.rank(Some(1)), 1);
        for selection in [None, Some(0), Some(1)] {
            assert_eq!(cond.selection_for_rank(cond.rank(selection)), selection);
        }
    }

    #[test]
    fn node_key_matches_inner_key() {
        let node = StepNode::Conditional(prototype());
        assert_eq!(node.key(), "making_prototype");
        assert!(node.is_conditional());
    }
}
