use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ops::task_ops::Mode;
use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let theme = &app.theme;
    let bg = theme.background;
    let key_style = Style::default()
        .fg(theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.text).bg(bg);
    let header_style = Style::default()
        .fg(theme.label)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    let bindings: &[(&str, &str)] = match app.mode() {
        Mode::List => {
            lines.push(Line::from(Span::styled(" Tasks", header_style)));
            &[
                (" \u{2191}\u{2193}/jk", "Move cursor"),
                (" g/G", "Jump to top/bottom"),
                (" Space/x", "Toggle complete"),
                (" Enter/e", "Edit task"),
                (" d/Del", "Delete task"),
                (" a/n/+", "Add task"),
                (" q", "Quit"),
            ]
        }
        Mode::Form { .. } => {
            lines.push(Line::from(Span::styled(" Task Form", header_style)));
            &[
                (" Tab/S-Tab", "Next/previous field"),
                (" Ctrl+S", "Save"),
                (" Enter", "Save (newline in description)"),
                (" Esc", "Cancel"),
                (" \u{2190}\u{2192}/l m h", "Choose priority"),
                (" \u{2190}\u{2192}", "Due date -/+ one day"),
                (" PgUp/PgDn", "Due date -/+ one month"),
                (" t", "Due date today"),
                (" Bksp/Del", "Clear due date"),
            ]
        }
    };
    for (key, desc) in bindings {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+Q", "Quit (immediate)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
