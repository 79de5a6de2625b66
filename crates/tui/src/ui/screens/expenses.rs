use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use api_types::expense::Expense;

use crate::{
    app::{AppState, Focus},
    summary::Summary,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, percentage},
            money::{format_amount, styled_expense, styled_total},
        },
        theme::Theme,
    },
};

const LABEL_WIDTH: usize = 13;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let summary = state.expenses.summary();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary cards
            Constraint::Min(0),    // Form, breakdown and history
        ])
        .split(area);

    render_summary_cards(frame, layout[0], state, &summary, &theme);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(layout[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(cols[0]);

    render_form(frame, left[0], state, &theme);
    render_breakdown(frame, left[1], state, &summary, &theme);
    render_history(frame, cols[1], state, &theme);
}

fn render_summary_cards(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    StatCard::new(
        "Total Expenses",
        styled_total(summary.total, &state.currency_symbol, theme),
        theme,
    )
    .render(frame, cols[0]);
    StatCard::new(
        "Total Transactions",
        Span::styled(summary.count.to_string(), Style::default().fg(theme.text)),
        theme,
    )
    .render(frame, cols[1]);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focus = state.expenses.focus;
    let form = &state.expenses.form;

    let card = Card::new("Add New Expense", theme).focused(focus.is_form());
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let amount_label = format!("Amount ({})", state.currency_symbol);
    let category = form
        .category
        .map(|c| c.label())
        .unwrap_or("Select a category");

    let lines = vec![
        field_line(
            "Description",
            &form.description,
            "e.g., Coffee with friends",
            focus == Focus::Description,
            theme,
        ),
        field_line(
            &amount_label,
            &form.amount,
            "e.g., 350.50",
            focus == Focus::Amount,
            theme,
        ),
        Line::from(vec![
            label_span("Category", focus == Focus::Category, theme),
            Span::styled("◀ ", Style::default().fg(theme.dim)),
            Span::styled(
                category,
                Style::default()
                    .fg(form.category.map_or(theme.dim, |c| theme.category(c)))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(theme.dim)),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.accent)),
            Span::raw(" Add Expense"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let cursor_row = match focus {
        Focus::Description => Some((0, form.description.chars().count())),
        Focus::Amount => Some((1, form.amount.chars().count())),
        Focus::Category | Focus::History => None,
    };
    if let Some((row, len)) = cursor_row {
        let x = inner.x + (LABEL_WIDTH + len).min(inner.width.saturating_sub(1) as usize) as u16;
        let y = inner.y + row;
        if y < inner.y + inner.height {
            frame.set_cursor_position((x, y));
        }
    }
}

fn label_span(label: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Span::styled(format!("{label:<LABEL_WIDTH$}"), style)
}

fn field_line<'a>(
    label: &str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &Theme,
) -> Line<'a> {
    let value = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(theme.dim))
    } else {
        Span::styled(value, Style::default().fg(theme.text))
    };
    Line::from(vec![label_span(label, focused, theme), value])
}

fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let card = Card::new("By Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if summary.by_category.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No data for chart yet.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let bar_width = (inner.width as usize).saturating_sub(6);
    let mut lines = Vec::with_capacity(summary.by_category.len() * 2);
    for (category, amount) in &summary.by_category {
        let share = summary.share(*category);
        let formatted = format_amount(*amount, &state.currency_symbol);
        let name = category.label();
        let gap = (inner.width as usize).saturating_sub(name.len() + formatted.chars().count());

        lines.push(Line::from(vec![
            Span::styled(name, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::styled(formatted, Style::default().fg(theme.text_muted)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                ascii_bar(share, bar_width),
                Style::default().fg(theme.category(*category)),
            ),
            Span::styled(
                format!(" {:>3}%", percentage(share)),
                Style::default().fg(theme.dim),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_history(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let expenses = &state.expenses;
    let card = Card::new("Expense History", theme).focused(expenses.focus == Focus::History);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut body = inner;
    if let Some(error) = &expenses.error {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ))
            .wrap(Wrap { trim: true }),
            rows[0],
        );
        body = rows[1];
    }

    if expenses.loading {
        frame.render_widget(
            Paragraph::new(Span::styled("Loading...", Style::default().fg(theme.accent)))
                .alignment(Alignment::Center),
            body,
        );
        return;
    }

    if expenses.items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses recorded yet. Add one to get started!",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            body,
        );
        return;
    }

    let items: Vec<ListItem> = expenses
        .newest_first()
        .map(|expense| expense_item(expense, body.width, &state.currency_symbol, theme))
        .collect();

    let list = List::new(items).highlight_style(Style::default().bg(theme.selection));
    let mut list_state = ListState::default();
    if expenses.focus == Focus::History {
        list_state.select(Some(expenses.selected));
    }
    frame.render_stateful_widget(list, body, &mut list_state);
}

fn expense_item<'a>(expense: &'a Expense, width: u16, symbol: &str, theme: &Theme) -> ListItem<'a> {
    let color = theme.category(expense.category);
    let amount = styled_expense(expense.amount, symbol, theme);
    let badge = format!(" {} ", expense.category.initial());
    let used = badge.chars().count() + 1 + amount.content.chars().count();
    let description_width = (width as usize).saturating_sub(used + 1);
    let description = truncate(&expense.description, description_width);
    let gap = (width as usize)
        .saturating_sub(used + description.chars().count())
        .max(1);

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                badge,
                Style::default()
                    .bg(color)
                    .fg(theme.surface)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                description,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(gap)),
            amount,
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(expense.category.label(), Style::default().fg(theme.dim)),
        ]),
    ])
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
