//! Color palette and styling for CLI output.
//!
//! Every formatter takes a `use_color` flag and returns plain text when it is
//! false, so output stays stable when piped.

use owo_colors::{OwoColorize, Style};

/// Style for skill names - the primary identifier, visually prominent.
pub fn skill_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for section headings like "Usage:" or "Next Steps:".
pub fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for labels like result indices or "by".
pub fn label() -> Style {
    Style::new().blue()
}

/// Style for description text - readable but subdued.
pub fn description() -> Style {
    Style::new().dimmed()
}

/// Style for path and URL values.
pub fn path() -> Style {
    Style::new().white()
}

/// Style for completed steps.
pub fn success() -> Style {
    Style::new().green()
}

/// Style for warning text.
pub fn warning() -> Style {
    Style::new().yellow()
}

/// Style for failures.
pub fn error() -> Style {
    Style::new().red()
}

/// Apply `style` to `text` when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format a skill name with styling.
pub fn fmt_skill_name(name: &str, use_color: bool) -> String {
    paint(name, skill_name(), use_color)
}

/// Format a section heading with styling.
pub fn fmt_heading(text: &str, use_color: bool) -> String {
    paint(text, heading(), use_color)
}

/// Format a label with styling.
pub fn fmt_label(text: &str, use_color: bool) -> String {
    paint(text, label(), use_color)
}

/// Format description text with styling.
pub fn fmt_description(text: &str, use_color: bool) -> String {
    paint(text, description(), use_color)
}

/// Format a path or URL with styling.
pub fn fmt_path(text: &str, use_color: bool) -> String {
    paint(text, path(), use_color)
}

/// Format a completed step with styling.
pub fn fmt_success(text: &str, use_color: bool) -> String {
    paint(text, success(), use_color)
}

/// Format warning text with styling.
pub fn fmt_warning(text: &str, use_color: bool) -> String {
    paint(text, warning(), use_color)
}

/// Format a failure message with styling.
pub fn fmt_error(text: &str, use_color: bool) -> String {
    paint(text, error(), use_color)
}
