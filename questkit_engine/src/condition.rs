//! condition.rs -- `Condition` Module
//!
//! Side-effect-free predicates over host state, used by conditional steps to
//! pick a branch.

use crate::requirement::ItemRequirement;
use crate::state::{GameState, WorldPoint};

/// Rectangular area spanning one or more planes. Corner order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    min: WorldPoint,
    max: WorldPoint,
}

impl Zone {
    pub fn new(a: WorldPoint, b: WorldPoint) -> Self {
        Self {
            min: WorldPoint::new(a.x.min(b.x), a.y.min(b.y), a.plane.min(b.plane)),
            max: WorldPoint::new(a.x.max(b.x), a.y.max(b.y), a.plane.max(b.plane)),
        }
    }

    pub fn contains(&self, point: WorldPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.plane..=self.max.plane).contains(&point.plane)
    }
}

/// How the children of a compound condition combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicType {
    And,
    Or,
}

/// A predicate over host state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `And` of nothing is true, `Or` of nothing is false.
    Logic(LogicType, Vec<Condition>),
    InZone(Zone),
    HasItem(ItemRequirement),
    WidgetText { group: u32, child: u32, text: String },
    Varbit { varbit: u32, value: i32 },
}

impl Condition {
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::Logic(LogicType::And, conditions)
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::Logic(LogicType::Or, conditions)
    }

    /// Returns true if the predicate holds for the supplied state.
    pub fn is_met(&self, state: &dyn GameState) -> bool {
        match self {
            Self::Logic(LogicType::And, kids) => kids.iter().all(|c| c.is_met(state)),
            Self::Logic(LogicType::Or, kids) => kids.iter().any(|c| c.is_met(state)),
            Self::InZone(zone) => state.position().is_some_and(|p| zone.contains(p)),
            Self::HasItem(req) => req.is_satisfied(state),
            Self::WidgetText { group, child, text } => state
                .widget_text(*group, *child)
                .is_some_and(|shown| shown.contains(text.as_str())),
            Self::Varbit { varbit, value } => state.varbit(*varbit) == *value,
        }
    }
}
