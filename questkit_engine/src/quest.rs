//! Quest module --
//!
//! [`QuestHelper`] is the immutable record a host queries each refresh: the step
//! map, item and general requirements, and the display panels. It is built once
//! (see [`crate::loader::build_quest`]) and only read afterwards.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use questkit_data::Id;
use thiserror::Error;

use crate::requirement::{GeneralRequirement, ItemRequirement};
use crate::state::GameState;
use crate::step::{ConditionalStep, QuestStep, StepNode};

/// Longest chain of nested conditional steps followed before giving up.
pub const MAX_BRANCH_DEPTH: usize = 16;

/// Reasons a checkpoint could not be resolved to a concrete step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("step '{0}' is not defined")]
    UnknownStep(Id),
    #[error("conditional step '{0}' branches back into itself")]
    Cycle(Id),
    #[error("conditional chain starting at '{key}' is deeper than {depth}")]
    TooDeep { key: Id, depth: usize },
}

/// Display grouping of steps and the items they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub label: String,
    pub steps: Vec<Id>,
    pub items: Vec<ItemRequirement>,
}

/// Branch taken at one conditional step while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub conditional: Id,
    /// `None` when the default step was used.
    pub branch: Option<usize>,
}

/// A checkpoint resolved all the way down to a concrete step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'q> {
    /// Declared checkpoint the lookup landed on.
    pub checkpoint: u32,
    pub step: &'q QuestStep,
    pub path: Vec<Choice>,
}

/// Complete guidance data for one quest.
#[derive(Debug, Clone)]
pub struct QuestHelper {
    pub name: String,
    pub slug: String,
    pub max_progress: u32,
    pub(crate) nodes: HashMap<Id, StepNode>,
    pub(crate) step_map: BTreeMap<u32, Id>,
    pub(crate) item_requirements: Vec<ItemRequirement>,
    pub(crate) item_recommended: Vec<ItemRequirement>,
    pub(crate) general_requirements: Vec<GeneralRequirement>,
    pub(crate) panels: Vec<Panel>,
}

impl QuestHelper {
    /// Checkpoint -> step key table. Several checkpoints may share one key.
    pub fn steps(&self) -> &BTreeMap<u32, Id> {
        &self.step_map
    }

    pub fn node(&self, key: &str) -> Option<&StepNode> {
        self.nodes.get(key)
    }

    /// Concrete (non-conditional) step by key.
    pub fn quest_step(&self, key: &str) -> Option<&QuestStep> {
        match self.nodes.get(key) {
            Some(StepNode::Step(step)) => Some(step),
            _ => None,
        }
    }

    pub fn conditional_step(&self, key: &str) -> Option<&ConditionalStep> {
        match self.nodes.get(key) {
            Some(StepNode::Conditional(cond)) => Some(cond),
            _ => None,
        }
    }

    /// Node declared exactly at `progress`.
    pub fn step_for(&self, progress: u32) -> Option<&StepNode> {
        self.step_map.get(&progress).and_then(|key| self.nodes.get(key))
    }

    /// Node of the greatest declared checkpoint not above `progress`.
    pub fn step_at_or_before(&self, progress: u32) -> Option<(u32, &StepNode)> {
        let (checkpoint, key) = self.step_map.range(..=progress).next_back()?;
        self.nodes.get(key).map(|node| (*checkpoint, node))
    }

    pub fn item_requirements(&self) -> &[ItemRequirement] {
        &self.item_requirements
    }

    pub fn item_recommended(&self) -> &[ItemRequirement] {
        &self.item_recommended
    }

    pub fn general_requirements(&self) -> &[GeneralRequirement] {
        &self.general_requirements
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel that lists the given step, if any.
    pub fn panel_for_step(&self, key: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.steps.iter().any(|s| s == key))
    }

    /// Required items the player does not hold.
    pub fn missing_items(&self, state: &dyn GameState) -> Vec<&ItemRequirement> {
        self.item_requirements
            .iter()
            .filter(|req| !req.is_satisfied(state))
            .collect()
    }

    /// Mandatory general requirements the player does not meet.
    pub fn unmet_general_requirements(&self, state: &dyn GameState) -> Vec<&GeneralRequirement> {
        self.general_requirements
            .iter()
            .filter(|req| !req.is_recommended() && !req.is_met(state))
            .collect()
    }

    pub fn meets_general_requirements(&self, state: &dyn GameState) -> bool {
        self.unmet_general_requirements(state).is_empty()
    }

    /// Resolve `progress` to a concrete step, letting every conditional pick
    /// its first matching branch.
    ///
    /// Progress values between declared checkpoints use the checkpoint below.
    ///
    /// # Errors
    /// - if the step map points at an undefined key
    /// - if conditional steps form a cycle or nest deeper than [`MAX_BRANCH_DEPTH`]
    pub fn resolve(&self, progress: u32, state: &dyn GameState) -> Result<Option<Resolution<'_>>, ResolveError> {
        self.resolve_with(progress, state, |_, natural| natural)
    }

    /// Like [`QuestHelper::resolve`], but `pick` may override the branch each
    /// conditional step selects. It receives the conditional and its natural
    /// selection and returns the selection to use.
    ///
    /// # Errors
    /// - same as [`QuestHelper::resolve`]
    pub fn resolve_with<F>(
        &self,
        progress: u32,
        state: &dyn GameState,
        mut pick: F,
    ) -> Result<Option<Resolution<'_>>, ResolveError>
    where
        F: FnMut(&ConditionalStep, Option<usize>) -> Option<usize>,
    {
        let Some((checkpoint, key)) = self.step_map.range(..=progress).next_back() else {
            return Ok(None);
        };

        let mut path: Vec<Choice> = Vec::new();
        let mut key = key;
        loop {
            match self.nodes.get(key) {
                None => {
                    warn!("'{}' checkpoint {checkpoint}: step '{key}' is not defined", self.name);
                    return Err(ResolveError::UnknownStep(key.clone()));
                },
                Some(StepNode::Step(step)) => {
                    return Ok(Some(Resolution {
                        checkpoint: *checkpoint,
                        step,
                        path,
                    }));
                },
                Some(StepNode::Conditional(cond)) => {
                    if path.iter().any(|c| c.conditional == cond.key) {
                        warn!(
                            "'{}' checkpoint {checkpoint}: conditional '{}' loops back on itself",
                            self.name, cond.key
                        );
                        return Err(ResolveError::Cycle(cond.key.clone()));
                    }
                    if path.len() >= MAX_BRANCH_DEPTH {
                        warn!(
                            "'{}' checkpoint {checkpoint}: conditionals nest deeper than {MAX_BRANCH_DEPTH} at '{}'",
                            self.name, cond.key
                        );
                        return Err(ResolveError::TooDeep {
                            key: self.step_map[checkpoint].clone(),
                            depth: MAX_BRANCH_DEPTH,
                        });
                    }
                    let natural = cond.select(state);
                    let branch = pick(cond, natural);
                    debug!(
                        "conditional '{}' at checkpoint {checkpoint}: natural {natural:?}, chosen {branch:?}",
                        cond.key
                    );
                    key = cond.target(branch);
                    path.push(Choice {
                        conditional: cond.key.clone(),
                        branch,
                    });
                },
            }
        }
    }
}
