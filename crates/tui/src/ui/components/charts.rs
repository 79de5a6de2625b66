/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Whole percentage for a ratio in `[0, 1]`.
#[must_use]
pub fn percentage(ratio: f64) -> u16 {
    if !ratio.is_finite() {
        return 0;
    }
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u16
}
