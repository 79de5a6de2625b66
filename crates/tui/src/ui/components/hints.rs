use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub const FORM_TEXT: &[KeyHint] = &[
    KeyHint::new("Tab", "next field"),
    KeyHint::new("Enter", "add expense"),
];

pub const FORM_CATEGORY: &[KeyHint] = &[
    KeyHint::new("←→", "category"),
    KeyHint::new("Tab", "next field"),
    KeyHint::new("Enter", "add expense"),
];

pub const HISTORY: &[KeyHint] = &[
    KeyHint::new("↑↓", "select"),
    KeyHint::new("d", "delete"),
    KeyHint::new("r", "refresh"),
    KeyHint::new("Tab", "form"),
];

pub const GLOBAL_TYPING: &[KeyHint] = &[
    KeyHint::new("Esc", "dismiss error"),
    KeyHint::new("Ctrl+C", "quit"),
];

pub const GLOBAL: &[KeyHint] = &[
    KeyHint::new("Esc", "dismiss error"),
    KeyHint::new("q", "quit"),
];
