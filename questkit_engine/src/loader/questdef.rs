//! QuestDef loader and conversion helpers.
//!
//! Converts the serialized `QuestDef` data model into runtime engine structs.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use ron::ser::PrettyConfig;

use questkit_data::{
    ConditionDef, ConditionExpr, ConditionalStepDef, Id, ItemRefDef, PanelDef, QuestDef, StepDef, StepKindDef,
};

use crate::condition::{Condition, Zone};
use crate::quest::{Panel, QuestHelper};
use crate::requirement::{GeneralRequirement, ItemRequirement};
use crate::slug::sanitize_slug;
use crate::step::{Branch, ConditionalStep, QuestStep, StepKind, StepNode};

/// Load a `QuestDef` from a RON file.
pub fn load_questdef(path: &Path) -> Result<QuestDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading questdef from '{}'", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing questdef RON from '{}'", path.display()))
}

/// Write a `QuestDef` as pretty RON.
pub fn save_questdef(def: &QuestDef, path: &Path) -> Result<()> {
    let text = ron::ser::to_string_pretty(def, PrettyConfig::default())
        .with_context(|| format!("serializing questdef '{}'", def.quest.name))?;
    fs::write(path, text).with_context(|| format!("writing questdef to '{}'", path.display()))
}

/// Lookup tables shared by the conversion helpers below.
struct Tables<'a> {
    items: HashMap<&'a str, ItemRequirement>,
    zones: HashMap<&'a str, Zone>,
    conditions: HashMap<&'a str, &'a ConditionExpr>,
}

/// Convert a `QuestDef` into a `QuestHelper`. Expects a validated definition.
pub fn quest_from_def(def: &QuestDef) -> Result<QuestHelper> {
    let tables = Tables {
        items: def
            .items
            .iter()
            .map(|i| (i.id.as_str(), ItemRequirement::from_def(i)))
            .collect(),
        zones: def
            .zones
            .iter()
            .map(|z| (z.id.as_str(), Zone::new(z.min.into(), z.max.into())))
            .collect(),
        conditions: def.conditions.iter().map(|c| (c.id.as_str(), &c.condition)).collect(),
    };

    let mut nodes = HashMap::new();
    for step_def in &def.steps {
        let step = step_from_def(step_def, &tables)?;
        nodes.insert(step.key.clone(), StepNode::Step(step));
    }
    for cond_def in &def.conditional_steps {
        let cond = conditional_from_def(cond_def, &tables)?;
        nodes.insert(cond.key.clone(), StepNode::Conditional(cond));
    }

    let step_map: BTreeMap<u32, Id> = def.step_map.clone();

    let slug = if def.quest.slug.trim().is_empty() {
        sanitize_slug(&def.quest.name)
    } else {
        sanitize_slug(&def.quest.slug)
    };

    Ok(QuestHelper {
        name: def.quest.name.clone(),
        slug,
        max_progress: def.quest.max_progress,
        nodes,
        step_map,
        item_requirements: item_list(&def.required_items, &tables).context("required items")?,
        item_recommended: item_list(&def.recommended_items, &tables).context("recommended items")?,
        general_requirements: def.general_requirements.iter().map(GeneralRequirement::from_def).collect(),
        panels: def
            .panels
            .iter()
            .map(|p| panel_from_def(p, &tables))
            .collect::<Result<Vec<_>>>()?,
    })
}

fn lookup_item(key: &str, tables: &Tables<'_>) -> Result<ItemRequirement> {
    tables
        .items
        .get(key)
        .cloned()
        .ok_or_else(|| anyhow!("item requirement '{key}' not defined"))
}

fn item_list(keys: &[Id], tables: &Tables<'_>) -> Result<Vec<ItemRequirement>> {
    keys.iter().map(|k| lookup_item(k, tables)).collect()
}

fn item_ref_from_def(item_ref: &ItemRefDef, tables: &Tables<'_>) -> Result<ItemRequirement> {
    let req = lookup_item(&item_ref.item, tables)?;
    Ok(if item_ref.highlighted { req.highlighted() } else { req })
}

fn step_from_def(def: &StepDef, tables: &Tables<'_>) -> Result<QuestStep> {
    let kind = match &def.kind {
        StepKindDef::Npc { npc, name } => StepKind::Npc {
            npc: *npc,
            name: name.clone(),
        },
        StepKindDef::Object { object, name } => StepKind::Object {
            object: *object,
            name: name.clone(),
        },
        StepKindDef::Detailed => StepKind::Detailed,
        StepKindDef::Puzzle { instructions } => StepKind::Puzzle {
            instructions: instructions.clone(),
        },
    };
    let items = def
        .items
        .iter()
        .map(|r| item_ref_from_def(r, tables))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("step '{}'", def.id))?;

    Ok(QuestStep {
        key: def.id.clone(),
        kind,
        description: def.description.clone(),
        location: def.location.map(Into::into),
        items,
        dialogue: def.dialogue.clone(),
        icon: def.icon,
    })
}

fn conditional_from_def(def: &ConditionalStepDef, tables: &Tables<'_>) -> Result<ConditionalStep> {
    let branches = def
        .branches
        .iter()
        .map(|b| {
            let expr = tables
                .conditions
                .get(b.condition.as_str())
                .ok_or_else(|| anyhow!("condition '{}' not defined", b.condition))?;
            Ok(Branch {
                condition: condition_from_expr(expr, tables)?,
                step: b.step.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("conditional step '{}'", def.id))?;

    Ok(ConditionalStep {
        key: def.id.clone(),
        default: def.default.clone(),
        branches,
    })
}

fn condition_from_expr(expr: &ConditionExpr, tables: &Tables<'_>) -> Result<Condition> {
    Ok(match expr {
        ConditionExpr::All(kids) => Condition::all(
            kids.iter()
                .map(|k| condition_from_expr(k, tables))
                .collect::<Result<_>>()?,
        ),
        ConditionExpr::Any(kids) => Condition::any(
            kids.iter()
                .map(|k| condition_from_expr(k, tables))
                .collect::<Result<_>>()?,
        ),
        ConditionExpr::Pred(pred) => match pred {
            ConditionDef::InZone { zone } => Condition::InZone(
                *tables
                    .zones
                    .get(zone.as_str())
                    .ok_or_else(|| anyhow!("zone '{zone}' not defined"))?,
            ),
            ConditionDef::HasItem { item } => Condition::HasItem(lookup_item(item, tables)?),
            ConditionDef::WidgetText { group, child, text } => Condition::WidgetText {
                group: *group,
                child: *child,
                text: text.clone(),
            },
            ConditionDef::Varbit { varbit, value } => Condition::Varbit {
                varbit: *varbit,
                value: *value,
            },
        },
    })
}

fn panel_from_def(def: &PanelDef, tables: &Tables<'_>) -> Result<Panel> {
    Ok(Panel {
        label: def.label.clone(),
        steps: def.steps.clone(),
        items: item_list(&def.items, tables).with_context(|| format!("panel '{}'", def.label))?,
    })
}
