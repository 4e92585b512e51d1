//! View module --
//!
//! Renders the helper panel as text: the current step, what it needs, the
//! dialogue to pick, the quest's general requirements and the panel groupings.
//! Everything is returned as a `String` so hosts decide where it goes.

pub mod icons;

use std::fmt::Write;

use colored::Colorize as _;
use textwrap::{fill, termwidth};

use crate::config::HelperConfig;
use crate::quest::{Panel, QuestHelper, ResolveError};
use crate::requirement::{GeneralRequirement, ItemRequirement};
use crate::state::GameState;
use crate::step::{QuestStep, StepKind, StepNode};
use crate::style::{PanelStyle as _, indented_block, normal_block};
use crate::view::icons::{
    ICON_CURRENT, ICON_DIALOGUE, ICON_ERROR, ICON_HIGHLIGHT, ICON_MISSING, ICON_SATISFIED, ICON_TOOLTIP,
};

/// Text renderer for one quest's helper panel.
#[derive(Debug, Clone)]
pub struct PanelView<'c> {
    pub width: usize,
    config: &'c HelperConfig,
}

impl<'c> PanelView<'c> {
    /// Wraps at the configured width, or the terminal width if none is set.
    pub fn new(config: &'c HelperConfig) -> Self {
        Self {
            width: config.wrap_width.unwrap_or_else(termwidth),
            config,
        }
    }

    pub fn with_width(config: &'c HelperConfig, width: usize) -> Self {
        Self { width, config }
    }

    /// Quest title followed by general, required and recommended requirements.
    pub fn overview(&self, quest: &QuestHelper, state: &dyn GameState) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", quest.name.quest_title_style());

        if !quest.general_requirements().is_empty() {
            let _ = writeln!(out, "{}:", "Requirements".subheading_style());
            for req in quest.general_requirements() {
                let _ = writeln!(out, "{}", general_line(req, state));
            }
            out.push('\n');
        }
        if !quest.item_requirements().is_empty() {
            let _ = writeln!(out, "{}:", "Items required".subheading_style());
            self.item_lines(&mut out, quest.item_requirements().iter(), state);
            out.push('\n');
        }
        if !quest.item_recommended().is_empty() {
            let _ = writeln!(out, "{}:", "Items recommended".subheading_style());
            self.item_lines(&mut out, quest.item_recommended().iter(), state);
            out.push('\n');
        }
        out
    }

    /// The step to do now, or a note when progress is before the first checkpoint.
    pub fn current_step(&self, step: Option<&QuestStep>, state: &dyn GameState) -> String {
        let Some(step) = step else {
            return format!("{}\n", "No guidance for the current quest progress.".italic());
        };
        let mut out = String::new();
        let _ = writeln!(out, "{:.>width$}\n", "current step".section_style(), width = self.width);
        let _ = writeln!(out, "{}", step_heading(step));
        let _ = writeln!(
            out,
            "{}",
            fill(&step.description, indented_block(self.width)).description_style()
        );

        if let StepKind::Puzzle { instructions } = &step.kind {
            out.push('\n');
            for (n, line) in instructions.iter().enumerate() {
                let numbered = format!("{}. {line}", n + 1);
                let _ = writeln!(out, "{}", fill(&numbered, indented_block(self.width)));
            }
        }

        if !step.items.is_empty() {
            let _ = writeln!(out, "\n{}:", "Items needed".subheading_style());
            self.item_lines(&mut out, step.items.iter(), state);
        }

        if self.config.show_dialogue && !step.dialogue.is_empty() {
            let _ = writeln!(out, "\n{}:", "Dialogue".subheading_style());
            for line in &step.dialogue {
                let _ = writeln!(out, "  {ICON_DIALOGUE} {}", line.dialogue_style());
            }
        }
        out
    }

    /// Every panel in order, with the current step marked.
    pub fn panels(&self, quest: &QuestHelper, current: Option<&str>, state: &dyn GameState) -> String {
        let mut out = String::new();
        for panel in quest.panels() {
            self.panel(&mut out, quest, panel, current, state);
        }
        out
    }

    /// A resolution failure, shown in place of the current step.
    pub fn resolve_error(&self, err: &ResolveError) -> String {
        let msg = format!("{ICON_ERROR} {err}");
        format!("{}\n", fill(&msg, normal_block(self.width)).error_style())
    }

    fn panel(&self, out: &mut String, quest: &QuestHelper, panel: &Panel, current: Option<&str>, state: &dyn GameState) {
        let _ = writeln!(out, "{:.>width$}\n", panel.label.section_style(), width = self.width);
        for key in &panel.steps {
            match quest.node(key) {
                Some(StepNode::Step(step)) => panel_step(out, step, current),
                // a branch point stands for the steps it can pick
                Some(StepNode::Conditional(cond)) => {
                    let targets = std::iter::once(&cond.default).chain(cond.branches.iter().map(|b| &b.step));
                    for step in targets.filter_map(|t| quest.quest_step(t)) {
                        panel_step(out, step, current);
                    }
                },
                None => {},
            }
        }
        if !panel.items.is_empty() {
            let _ = writeln!(out, "\n{}:", "Items".subheading_style());
            self.item_lines(out, panel.items.iter(), state);
        }
        out.push('\n');
    }

    fn item_lines<'a>(
        &self,
        out: &mut String,
        items: impl Iterator<Item = &'a ItemRequirement>,
        state: &dyn GameState,
    ) {
        for req in items {
            let _ = writeln!(out, "{}", item_line(req, state));
            if self.config.show_tooltips
                && let Some(tooltip) = &req.tooltip
            {
                let text = format!("{ICON_TOOLTIP} {tooltip}");
                let _ = writeln!(out, "{}", fill(&text, indented_block(self.width)).tooltip_style());
            }
        }
    }
}

fn panel_step(out: &mut String, step: &QuestStep, current: Option<&str>) {
    if current == Some(step.key.as_str()) {
        let _ = writeln!(out, "{ICON_CURRENT} {}", step.description.current_step_style());
    } else {
        let _ = writeln!(out, "  {}", step.description);
    }
}

/// Styled form of [`QuestStep::describe`].
fn step_heading(step: &QuestStep) -> String {
    let mut line = step.kind.verb().to_string();
    if let Some(target) = step.kind.target_label() {
        let target = if step.kind.is_npc() { target.npc_style() } else { target.object_style() };
        let _ = write!(line, " {target}");
    }
    if let Some(point) = step.location {
        let _ = write!(line, " {}", format!("at {point}").location_style());
    }
    line
}

fn item_line(req: &ItemRequirement, state: &dyn GameState) -> String {
    let name = req.to_string();
    let highlight = if req.highlighted { format!(" {ICON_HIGHLIGHT}") } else { String::new() };
    if req.is_satisfied(state) {
        format!("  {} {}{highlight}", ICON_SATISFIED.satisfied_style(), name.item_style())
    } else {
        let held = req.best_count(state);
        let progress = if req.quantity > 1 && held > 0 {
            format!(" ({held}/{})", req.quantity)
        } else {
            String::new()
        };
        format!(
            "  {} {}{progress}{highlight}",
            ICON_MISSING.missing_style(),
            name.item_style()
        )
    }
}

fn general_line(req: &GeneralRequirement, state: &dyn GameState) -> String {
    let text = req.to_string();
    let text = if req.is_recommended() { text.recommended_style() } else { text.normal() };
    if req.is_met(state) {
        format!("  {} {text}", ICON_SATISFIED.satisfied_style())
    } else {
        format!("  {} {text}", ICON_MISSING.missing_style())
    }
}
