use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::task_ops::Mode;
use crate::tui::app::{App, StatusKind};
use crate::tui::text_edit::{display_width, truncate_to_width};

use super::helpers::pad_line;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let hint = match app.mode() {
        Mode::List => "? help ",
        Mode::Form { .. } => "Ctrl+S save  Esc cancel ",
    };
    let right = if app.show_key_hints && !app.show_help {
        vec![Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg))]
    } else {
        Vec::new()
    };

    let mut left = Vec::new();
    if let Some(status) = &app.status {
        let fg = match status.kind {
            StatusKind::Info => app.theme.accent,
            StatusKind::Error => app.theme.red,
        };
        let room = width.saturating_sub(display_width(hint) + 2);
        left.push(Span::styled(
            format!(" {}", truncate_to_width(&status.text, room)),
            Style::default().fg(fg).bg(bg),
        ));
    }

    let line: Line = pad_line(left, right, width, bg);
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
