//! Glyphs used in rendered panels.

pub const ICON_SATISFIED: &str = "\u{2714}"; // ✔
pub const ICON_MISSING: &str = "\u{2716}"; // ✖
pub const ICON_CURRENT: &str = "\u{25B6}"; // ▶
pub const ICON_DIALOGUE: &str = "\u{201C}"; // “
pub const ICON_TOOLTIP: &str = "\u{2139}"; // ℹ
pub const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
pub const ICON_HIGHLIGHT: &str = "\u{2605}"; // ★
