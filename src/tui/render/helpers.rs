use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::text_edit::display_width;

/// Checkbox marker for a task row
pub(super) fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Due date as shown in rows and the picker
pub(super) fn due_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

/// Lay out `left` and `right` on one line, filling the gap with `bg`.
/// When both don't fit, they are simply concatenated.
pub(super) fn pad_line(
    left: Vec<Span<'static>>,
    right: Vec<Span<'static>>,
    width: usize,
    bg: Color,
) -> Line<'static> {
    let used = spans_width(&left) + spans_width(&right);
    let mut spans = left;
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }
    spans.extend(right);
    Line::from(spans)
}
