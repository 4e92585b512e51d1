//! Styling helpers for terminal output.
//!
//! The [`PanelStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use textwrap::Options;

/// Convenience trait for applying color and style to helper panel output.
pub trait PanelStyle {
    fn quest_title_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn object_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn location_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn dialogue_style(&self) -> ColoredString;
    fn tooltip_style(&self) -> ColoredString;
    fn satisfied_style(&self) -> ColoredString;
    fn missing_style(&self) -> ColoredString;
    fn recommended_style(&self) -> ColoredString;
    fn current_step_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl PanelStyle for &str {
    fn quest_title_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).bold().underline()
    }
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn npc_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60).underline()
    }
    fn object_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn location_style(&self) -> ColoredString {
        self.dimmed()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn dialogue_style(&self) -> ColoredString {
        self.truecolor(230, 230, 30)
    }
    fn tooltip_style(&self) -> ColoredString {
        self.italic().dimmed()
    }
    fn satisfied_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn missing_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn recommended_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn current_step_style(&self) -> ColoredString {
        self.bold().truecolor(220, 40, 220)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl PanelStyle for String {
    fn quest_title_style(&self) -> ColoredString {
        self.as_str().quest_title_style()
    }
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn npc_style(&self) -> ColoredString {
        self.as_str().npc_style()
    }
    fn object_style(&self) -> ColoredString {
        self.as_str().object_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn location_style(&self) -> ColoredString {
        self.as_str().location_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn dialogue_style(&self) -> ColoredString {
        self.as_str().dialogue_style()
    }
    fn tooltip_style(&self) -> ColoredString {
        self.as_str().tooltip_style()
    }
    fn satisfied_style(&self) -> ColoredString {
        self.as_str().satisfied_style()
    }
    fn missing_style(&self) -> ColoredString {
        self.as_str().missing_style()
    }
    fn recommended_style(&self) -> ColoredString {
        self.as_str().recommended_style()
    }
    fn current_step_style(&self) -> ColoredString {
        self.as_str().current_step_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}

/// Wrap options for flush-left paragraphs.
pub fn normal_block(width: usize) -> Options<'static> {
    Options::new(width)
}

/// Wrap options for paragraphs nested under a heading.
pub fn indented_block(width: usize) -> Options<'static> {
    Options::new(width).initial_indent("    ").subsequent_indent("    ")
}
