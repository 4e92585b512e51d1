use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a QuestDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
    UnreachableStep { panel: String, step: String },
    ConditionalInPanel { panel: String, step: String },
    ConditionalCycle { step: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
            ValidationError::UnreachableStep { panel, step } => {
                write!(f, "panel '{panel}' lists step '{step}' which no checkpoint can reach")
            },
            ValidationError::ConditionalInPanel { panel, step } => {
                write!(f, "panel '{panel}' lists conditional step '{step}'; list its branch steps instead")
            },
            ValidationError::ConditionalCycle { step } => {
                write!(f, "conditional step '{step}' can branch back into itself")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a QuestDef.
///
/// ```
/// use questkit_data::{QuestDef, QuestMetaDef, StepDef, StepKindDef, validate_quest};
///
/// let mut quest = QuestDef {
///     quest: QuestMetaDef {
///         name: "Demo".into(),
///         ..QuestMetaDef::default()
///     },
///     ..QuestDef::default()
/// };
/// quest.steps.push(StepDef {
///     id: "start".into(),
///     kind: StepKindDef::Detailed,
///     description: "Begin the quest.".into(),
///     location: None,
///     items: Vec::new(),
///     dialogue: Vec::new(),
///     icon: None,
/// });
/// quest.step_map.insert(0, "start".into());
/// assert!(validate_quest(&quest).is_empty());
/// ```
pub fn validate_quest(quest: &QuestDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut items = HashSet::new();
    let mut zones = HashSet::new();
    let mut conditions = HashSet::new();
    let mut steps = HashSet::new();

    track_ids("item", quest.items.iter().map(|i| i.id.as_str()), &mut items, &mut errors);
    track_ids("zone", quest.zones.iter().map(|z| z.id.as_str()), &mut zones, &mut errors);
    track_ids(
        "condition",
        quest.conditions.iter().map(|c| c.id.as_str()),
        &mut conditions,
        &mut errors,
    );
    // plain and conditional steps share one key space: both can sit in the step map
    track_ids(
        "step",
        quest
            .steps
            .iter()
            .map(|s| s.id.as_str())
            .chain(quest.conditional_steps.iter().map(|c| c.id.as_str())),
        &mut steps,
        &mut errors,
    );

    let ids = IdSets {
        items: &items,
        zones: &zones,
        conditions: &conditions,
        steps: &steps,
    };

    if quest.quest.name.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "quest name missing".to_string(),
        });
    }

    for item in &quest.items {
        if item.quantity == 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' requires a quantity of zero", item.id),
            });
        }
        if item.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{}' has no display name", item.id),
            });
        }
    }

    for cond in &quest.conditions {
        validate_condition_expr(&cond.condition, &ids, &mut errors, &format!("condition '{}'", cond.id));
    }

    for step in &quest.steps {
        let context = format!("step '{}'", step.id);
        if step.description.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} has no description"),
            });
        }
        if let StepKindDef::Puzzle { instructions } = &step.kind
            && instructions.is_empty()
        {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} puzzle has no instructions"),
            });
        }
        for item_ref in &step.items {
            check_ref("item", &item_ref.item, ids.items, context.clone(), &mut errors);
        }
    }

    for cond_step in &quest.conditional_steps {
        let context = format!("conditional step '{}'", cond_step.id);
        check_ref("step", &cond_step.default, ids.steps, context.clone(), &mut errors);
        for branch in &cond_step.branches {
            check_ref("condition", &branch.condition, ids.conditions, context.clone(), &mut errors);
            check_ref("step", &branch.step, ids.steps, context.clone(), &mut errors);
        }
    }

    if quest.step_map.is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "step map is empty".to_string(),
        });
    }
    for (progress, step) in &quest.step_map {
        if *progress > quest.quest.max_progress {
            errors.push(ValidationError::InvalidValue {
                context: format!(
                    "checkpoint {progress} lies outside the published range 0..={}",
                    quest.quest.max_progress
                ),
            });
        }
        check_ref("step", step, ids.steps, format!("checkpoint {progress}"), &mut errors);
    }

    for item in &quest.required_items {
        check_ref("item", item, ids.items, "required items".to_string(), &mut errors);
    }
    for item in &quest.recommended_items {
        check_ref("item", item, ids.items, "recommended items".to_string(), &mut errors);
        if quest.required_items.contains(item) {
            errors.push(ValidationError::InvalidValue {
                context: format!("item '{item}' is listed as both required and recommended"),
            });
        }
    }

    for req in &quest.general_requirements {
        if let GeneralRequirementDef::Skill { skill, level, .. } = req
            && *level == 0
        {
            errors.push(ValidationError::InvalidValue {
                context: format!("{skill} requirement has level zero"),
            });
        }
    }

    let reachable = reachable_steps(quest);
    let conditional: HashSet<&str> = quest.conditional_steps.iter().map(|c| c.id.as_str()).collect();
    for panel in &quest.panels {
        let context = format!("panel '{}'", panel.label);
        for step in &panel.steps {
            if !ids.steps.contains(step.as_str()) {
                check_ref("step", step, ids.steps, context.clone(), &mut errors);
            } else if conditional.contains(step.as_str()) {
                errors.push(ValidationError::ConditionalInPanel {
                    panel: panel.label.clone(),
                    step: step.clone(),
                });
            } else if !reachable.contains(step.as_str()) {
                errors.push(ValidationError::UnreachableStep {
                    panel: panel.label.clone(),
                    step: step.clone(),
                });
            }
        }
        for item in &panel.items {
            check_ref("item", item, ids.items, context.clone(), &mut errors);
        }
    }

    detect_cycles(quest, &mut errors);

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str) -> StepDef {
        StepDef {
            id: id.to_string(),
            kind: StepKindDef::Detailed,
            description: format!("Do {id}."),
            location: None,
            items: Vec::new(),
            dialogue: Vec::new(),
            icon: None,
        }
    }

    fn item(id: &str) -> ItemRequirementDef {
        ItemRequirementDef {
            id: id.to_string(),
            name: format!("Item {id}"),
            item: ItemId(1),
            alternates: Vec::new(),
            quantity: 1,
            tooltip: None,
        }
    }

    fn base_quest() -> QuestDef {
        let mut quest = QuestDef {
            quest: QuestMetaDef {
                name: "Demo".into(),
                ..QuestMetaDef::default()
            },
            steps: vec![step("start"), step("end")],
            ..QuestDef::default()
        };
        quest.step_map.insert(0, "start".into());
        quest.step_map.insert(100, "end".into());
        quest
    }

    #[test]
    fn base_quest_is_valid() {
        assert!(validate_quest(&base_quest()).is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut quest = base_quest();
        quest.conditional_steps.push(ConditionalStepDef {
            id: "start".into(),
            default: "end".into(),
            branches: Vec::new(),
        });

        let errors = validate_quest(&quest);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateId { kind, id } if *kind == "step" && id == "start"))
        );
    }

    #[test]
    fn missing_references_are_reported() {
        let mut quest = base_quest();
        quest.steps[0].items.push(ItemRefDef::highlighted("papyrus"));
        quest.step_map.insert(50, "nowhere".into());

        let errors = validate_quest(&quest);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "item" && id == "papyrus")));
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "step" && id == "nowhere")));
    }

    #[test]
    fn condition_references_are_checked() {
        let mut quest = base_quest();
        quest.conditions.push(NamedConditionDef {
            id: "on_island".into(),
            condition: ConditionExpr::Any(vec![
                ConditionExpr::Pred(ConditionDef::InZone { zone: "island".into() }),
                ConditionExpr::Pred(ConditionDef::HasItem { item: "boat".into() }),
            ]),
        });

        let errors = validate_quest(&quest);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, .. } if *kind == "zone")));
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, .. } if *kind == "item")));
    }

    #[test]
    fn checkpoint_outside_range_is_reported() {
        let mut quest = base_quest();
        quest.step_map.insert(101, "end".into());

        let errors = validate_quest(&quest);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("101")))
        );
    }

    #[test]
    fn zero_quantity_is_reported() {
        let mut quest = base_quest();
        let mut sacks = item("sacks");
        sacks.quantity = 0;
        quest.items.push(sacks);

        let errors = validate_quest(&quest);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { .. }))
        );
    }

    #[test]
    fn overlapping_required_and_recommended_items_are_reported() {
        let mut quest = base_quest();
        quest.items.push(item("teleport"));
        quest.required_items.push("teleport".into());
        quest.recommended_items.push("teleport".into());

        let errors = validate_quest(&quest);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::InvalidValue { context } if context.contains("teleport")))
        );
    }

    #[test]
    fn orphaned_panel_step_is_reported() {
        let mut quest = base_quest();
        quest.steps.push(step("display_only"));
        quest.panels.push(PanelDef {
            label: "Everything".into(),
            steps: vec!["start".into(), "display_only".into()],
            items: Vec::new(),
        });

        let errors = validate_quest(&quest);
        assert_eq!(
            errors,
            vec![ValidationError::UnreachableStep {
                panel: "Everything".into(),
                step: "display_only".into(),
            }]
        );
    }

    #[test]
    fn branch_targets_count_as_reachable() {
        let mut quest = base_quest();
        quest.steps.push(step("branch_target"));
        quest.zones.push(ZoneDef {
            id: "island".into(),
            min: WorldPointDef::new(0, 0, 0),
            max: WorldPointDef::new(10, 10, 0),
        });
        quest.conditions.push(NamedConditionDef {
            id: "on_island".into(),
            condition: ConditionExpr::Pred(ConditionDef::InZone { zone: "island".into() }),
        });
        quest.conditional_steps.push(ConditionalStepDef {
            id: "travel".into(),
            default: "start".into(),
            branches: vec![BranchDef {
                condition: "on_island".into(),
                step: "branch_target".into(),
            }],
        });
        quest.step_map.insert(0, "travel".into());
        quest.panels.push(PanelDef {
            label: "Start".into(),
            steps: vec!["start".into(), "branch_target".into()],
            items: Vec::new(),
        });

        assert!(validate_quest(&quest).is_empty());
    }

    #[test]
    fn conditional_panel_entries_are_reported() {
        let mut quest = base_quest();
        quest.steps.push(step("a"));
        quest.steps.push(step("b"));
        quest.conditional_steps.push(ConditionalStepDef {
            id: "branchy".into(),
            default: "a".into(),
            branches: vec![BranchDef {
                condition: "always".into(),
                step: "b".into(),
            }],
        });
        quest.conditions.push(NamedConditionDef {
            id: "always".into(),
            condition: ConditionExpr::All(Vec::new()),
        });
        quest.step_map.insert(10, "branchy".into());
        quest.panels.push(PanelDef {
            label: "Only".into(),
            steps: vec!["branchy".into()],
            items: Vec::new(),
        });

        let errors = validate_quest(&quest);
        assert_eq!(
            errors,
            vec![ValidationError::ConditionalInPanel {
                panel: "Only".into(),
                step: "branchy".into(),
            }]
        );
        assert!(errors[0].to_string().contains("branch steps"));
    }

    #[test]
    fn conditional_cycles_are_reported() {
        let mut quest = base_quest();
        quest.conditional_steps.push(ConditionalStepDef {
            id: "a".into(),
            default: "b".into(),
            branches: Vec::new(),
        });
        quest.conditional_steps.push(ConditionalStepDef {
            id: "b".into(),
            default: "a".into(),
            branches: Vec::new(),
        });
        quest.step_map.insert(10, "a".into());

        let errors = validate_quest(&quest);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::ConditionalCycle { .. }))
        );
    }
}

struct IdSets<'a> {
    items: &'a HashSet<String>,
    zones: &'a HashSet<String>,
    conditions: &'a HashSet<String>,
    steps: &'a HashSet<String>,
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

fn validate_condition_expr(expr: &ConditionExpr, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>, context: &str) {
    match expr {
        ConditionExpr::All(kids) | ConditionExpr::Any(kids) => {
            for kid in kids {
                validate_condition_expr(kid, ids, errors, context);
            }
        },
        ConditionExpr::Pred(cond) => {
            validate_condition(cond, ids, errors, context);
        },
    }
}

fn validate_condition(cond: &ConditionDef, ids: &IdSets<'_>, errors: &mut Vec<ValidationError>, context: &str) {
    match cond {
        ConditionDef::InZone { zone } => {
            check_ref("zone", zone, ids.zones, context.to_string(), errors);
        },
        ConditionDef::HasItem { item } => {
            check_ref("item", item, ids.items, context.to_string(), errors);
        },
        ConditionDef::WidgetText { text, .. } => {
            if text.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{context}: widget text to match is empty"),
                });
            }
        },
        ConditionDef::Varbit { .. } => {},
    }
}

/// Every step key a checkpoint can resolve to, following conditional branches.
fn reachable_steps(quest: &QuestDef) -> HashSet<&str> {
    let conditionals: HashMap<&str, &ConditionalStepDef> =
        quest.conditional_steps.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut seen = HashSet::new();
    let mut queue: VecDeque<&str> = quest.step_map.values().map(String::as_str).collect();
    while let Some(key) = queue.pop_front() {
        if !seen.insert(key) {
            continue;
        }
        if let Some(&cond_step) = conditionals.get(key) {
            queue.push_back(cond_step.default.as_str());
            queue.extend(cond_step.branches.iter().map(|b| b.step.as_str()));
        }
    }
    seen
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

fn detect_cycles(quest: &QuestDef, errors: &mut Vec<ValidationError>) {
    let conditionals: HashMap<&str, &ConditionalStepDef> =
        quest.conditional_steps.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut marks: HashMap<&str, Mark> = HashMap::new();

    for cond_step in &quest.conditional_steps {
        visit(cond_step.id.as_str(), &conditionals, &mut marks, errors);
    }
}

fn visit<'a>(
    key: &'a str,
    conditionals: &HashMap<&'a str, &'a ConditionalStepDef>,
    marks: &mut HashMap<&'a str, Mark>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(&cond_step) = conditionals.get(key) else {
        return;
    };
    match marks.get(key) {
        Some(Mark::Done) => return,
        Some(Mark::Visiting) => {
            errors.push(ValidationError::ConditionalCycle { step: key.to_string() });
            return;
        },
        None => {},
    }
    marks.insert(key, Mark::Visiting);
    let targets = std::iter::once(cond_step.default.as_str()).chain(cond_step.branches.iter().map(|b| b.step.as_str()));
    for target in targets {
        visit(target, conditionals, marks, errors);
    }
    marks.insert(key, Mark::Done);
}
