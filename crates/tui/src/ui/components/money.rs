use api_types::Amount;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Formats an amount as `<symbol><units>.<cents>` with thousands separators,
/// e.g. `₹1,234.50`.
#[must_use]
pub fn format_amount(amount: Amount, symbol: &str) -> String {
    let plain = amount.to_string();
    let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (idx, digit) in units.chars().enumerate() {
        if idx > 0 && (units.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{symbol}{grouped}.{cents}")
}

/// An expense row amount: always shown as money going out.
#[must_use]
pub fn styled_expense(amount: Amount, symbol: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!("-{}", format_amount(amount, symbol)),
        Style::default()
            .fg(theme.negative)
            .add_modifier(Modifier::BOLD),
    )
}

/// Creates a styled span with bold modifier for emphasis (e.g., totals).
#[must_use]
pub fn styled_total(amount: Amount, symbol: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format_amount(amount, symbol),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_symbol_and_two_decimals() {
        assert_eq!(format_amount(Amount::from_cents(5000), "₹"), "₹50.00");
        assert_eq!(format_amount(Amount::from_cents(7), "$"), "$0.07");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(Amount::from_cents(123_456_789), "₹"), "₹1,234,567.89");
        assert_eq!(format_amount(Amount::from_cents(100_000), ""), "1,000.00");
        assert_eq!(format_amount(Amount::from_cents(99_999), ""), "999.99");
    }

    #[test]
    fn expense_rows_are_negative() {
        let span = styled_expense(Amount::from_cents(35050), "₹", &Theme::default());
        assert_eq!(span.content, "-₹350.50");
    }
}
