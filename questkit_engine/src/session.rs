//! Session module --
//!
//! A `QuestSession` is what a host keeps alive while the helper panel is open.
//! Each tick it is refreshed with fresh game state and reports the step to
//! show. The `ResolutionMode` decides whether a conditional step may fall back
//! to an earlier branch when, say, an item is dropped.

use std::collections::HashMap;

use log::{debug, info};
use questkit_data::Id;
use serde::{Deserialize, Serialize};

use crate::quest::{QuestHelper, ResolveError};
use crate::state::GameState;
use crate::step::QuestStep;

/// How conditional steps react to state that moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionMode {
    /// Re-evaluate from scratch every refresh.
    #[default]
    Reactive,
    /// Within one checkpoint, never return to a lower-ranked branch.
    ForwardOnly,
}

/// Live helper state for one player working through one quest.
#[derive(Debug)]
pub struct QuestSession<'q> {
    quest: &'q QuestHelper,
    mode: ResolutionMode,
    checkpoint: Option<u32>,
    best_rank: HashMap<Id, usize>,
    current: Option<Id>,
}

impl<'q> QuestSession<'q> {
    pub fn new(quest: &'q QuestHelper, mode: ResolutionMode) -> Self {
        info!("quest session opened for '{}' ({mode:?})", quest.name);
        Self {
            quest,
            mode,
            checkpoint: None,
            best_rank: HashMap::new(),
            current: None,
        }
    }

    /// Key of the step shown after the last refresh.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Re-evaluate against `state` and return the step to display.
    ///
    /// # Errors
    /// - propagates [`ResolveError`] from the quest's step graph
    pub fn refresh(&mut self, state: &dyn GameState) -> Result<Option<&'q QuestStep>, ResolveError> {
        let quest = self.quest;
        let progress = state.quest_progress();
        let checkpoint = quest.step_at_or_before(progress).map(|(c, _)| c);
        if checkpoint != self.checkpoint {
            debug!("checkpoint changed {:?} -> {checkpoint:?}; clearing branch memory", self.checkpoint);
            self.best_rank.clear();
            self.checkpoint = checkpoint;
        }

        let mode = self.mode;
        let best_rank = &mut self.best_rank;
        let resolution = quest.resolve_with(progress, state, |cond, natural| match mode {
            ResolutionMode::Reactive => natural,
            ResolutionMode::ForwardOnly => {
                let rank = cond.rank(natural);
                let best = best_rank.entry(cond.key.clone()).or_insert(rank);
                if rank >= *best {
                    *best = rank;
                    natural
                } else {
                    cond.selection_for_rank(*best)
                }
            },
        })?;

        let step = resolution.map(|r| r.step);
        let key = step.map(|s| s.key.clone());
        if key != self.current {
            info!(
                "'{}' progress {progress}: step {} -> {}",
                quest.name,
                self.current.as_deref().unwrap_or("<none>"),
                key.as_deref().unwrap_or("<none>")
            );
            self.current = key;
        }
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::quest::QuestHelper;
    use crate::requirement::ItemRequirement;
    use crate::state::StateSnapshot;
    use crate::step::{Branch, ConditionalStep, StepKind, StepNode};
    use questkit_data::ItemId;
    use std::collections::{BTreeMap, HashMap};

    const STRUCTURE: ItemId = ItemId(9933);

    fn detailed(key: &str) -> StepNode {
        StepNode::Step(QuestStep {
            key: key.into(),
            kind: StepKind::Detailed,
            description: format!("Do {key}."),
            location: None,
            items: Vec::new(),
            dialogue: Vec::new(),
            icon: None,
        })
    }

    fn quest() -> QuestHelper {
        let cond = StepNode::Conditional(ConditionalStep {
            key: "prototype".into(),
            default: "make_structure".into(),
            branches: vec![Branch {
                condition: Condition::HasItem(ItemRequirement::new("structure", "Balloon structure", STRUCTURE, 1)),
                step: "add_candle".into(),
            }],
        });
        let nodes: HashMap<Id, StepNode> = vec![cond, detailed("make_structure"), detailed("add_candle"), detailed("next")]
            .into_iter()
            .map(|n| (n.key().clone(), n))
            .collect();
        let mut step_map = BTreeMap::new();
        step_map.insert(20, "prototype".to_string());
        step_map.insert(40, "next".to_string());
        QuestHelper {
            name: "Test".into(),
            slug: "test".into(),
            max_progress: 100,
            nodes,
            step_map,
            item_requirements: Vec::new(),
            item_recommended: Vec::new(),
            general_requirements: Vec::new(),
            panels: Vec::new(),
        }
    }

    fn shown(session: &mut QuestSession<'_>, state: &StateSnapshot) -> String {
        session.refresh(state).unwrap().unwrap().key.clone()
    }

    #[test]
    fn reactive_sessions_fall_back_when_item_is_lost() {
        let q = quest();
        let mut session = QuestSession::new(&q, ResolutionMode::Reactive);
        let mut state = StateSnapshot::at_progress(20);
        state.give(STRUCTURE, 1);
        assert_eq!(shown(&mut session, &state), "add_candle");
        state.take_all(STRUCTURE);
        assert_eq!(shown(&mut session, &state), "make_structure");
    }

    #[test]
    fn forward_only_sessions_hold_their_branch() {
        let q = quest();
        let mut session = QuestSession::new(&q, ResolutionMode::ForwardOnly);
        let mut state = StateSnapshot::at_progress(20);
        assert_eq!(shown(&mut session, &state), "make_structure");
        state.give(STRUCTURE, 1);
        assert_eq!(shown(&mut session, &state), "add_candle");
        state.take_all(STRUCTURE);
        assert_eq!(shown(&mut session, &state), "add_candle");
        assert_eq!(session.current_key(), Some("add_candle"));
    }

    #[test]
    fn forward_only_memory_resets_on_new_checkpoint() {
        let q = quest();
        let mut session = QuestSession::new(&q, ResolutionMode::ForwardOnly);
        let mut state = StateSnapshot::at_progress(20);
        state.give(STRUCTURE, 1);
        assert_eq!(shown(&mut session, &state), "add_candle");

        state.progress = 40;
        assert_eq!(shown(&mut session, &state), "next");

        state.progress = 20;
        state.take_all(STRUCTURE);
        assert_eq!(shown(&mut session, &state), "make_structure");
    }

    #[test]
    fn sub_checkpoint_progress_keeps_previous_step() {
        let q = quest();
        let mut session = QuestSession::new(&q, ResolutionMode::Reactive);
        let state = StateSnapshot::at_progress(25);
        assert_eq!(shown(&mut session, &state), "make_structure");
    }

    #[test]
    fn progress_before_first_checkpoint_shows_nothing() {
        let q = quest();
        let mut session = QuestSession::new(&q, ResolutionMode::Reactive);
        let state = StateSnapshot::at_progress(0);
        assert_eq!(session.refresh(&state), Ok(None));
        assert_eq!(session.current_key(), None);
    }
}
