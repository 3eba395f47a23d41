use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const BG_BASE: Color = Color::Rgb(6, 8, 14);
pub const BG_PANEL: Color = Color::Rgb(16, 19, 28);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 52);
pub const BG_REVEAL: Color = Color::Rgb(30, 58, 48);
pub const FG_ACCENT: Color = Color::Rgb(150, 170, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[✔]"
    } else {
        "[ ]"
    }
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("Home / End", "Jump to first / last task"),
        ("a", "Add a task"),
        ("Tab (while adding)", "Switch between text and due time"),
        ("Space / Enter", "Toggle complete"),
        ("e", "Edit selected task in place"),
        ("Enter (while editing)", "Save; empty text deletes the task"),
        ("Esc (while editing)", "Discard the edit"),
        ("x / Delete", "Delete selected task"),
        ("c", "Clear completed tasks"),
        ("h / ?", "Toggle this help overlay"),
        ("q / Ctrl+C", "Quit"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}

/// Spans for an input field with a block caret at the cursor.
pub fn caret_spans(before: &str, after: &str, style: Style) -> Vec<Span<'static>> {
    let mut chars = after.chars();
    let (under, rest) = match chars.next() {
        Some(ch) => (ch.to_string(), chars.as_str().to_string()),
        None => (String::from(" "), String::new()),
    };
    vec![
        Span::styled(before.to_string(), style),
        Span::styled(under, style.add_modifier(Modifier::REVERSED)),
        Span::styled(rest, style),
    ]
}
