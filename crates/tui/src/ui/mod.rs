pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Connection, Focus};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::expenses::render(frame, layout[1], state);
    render_bottom_bar(frame, layout[2], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .expenses
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = match state.expenses.connection {
        Connection::Pending => ("...", Style::default().fg(theme.dim)),
        Connection::Ok => ("OK", Style::default().fg(theme.positive)),
        Connection::Failed => ("ERR", Style::default().fg(theme.error)),
    };

    let line = Line::from(vec![
        Span::styled(
            "Expense Tracker",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.endpoint)),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    use components::hints::{self, hint_separator, hints_to_spans};

    let focus = state.expenses.focus;
    let (context, global) = match focus {
        Focus::Description | Focus::Amount => (hints::FORM_TEXT, hints::GLOBAL_TYPING),
        Focus::Category => (hints::FORM_CATEGORY, hints::GLOBAL),
        Focus::History => (hints::HISTORY, hints::GLOBAL),
    };

    let mut parts = hints_to_spans(context, theme);
    parts.push(hint_separator(theme));
    parts.extend(hints_to_spans(global, theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
