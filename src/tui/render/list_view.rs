use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::ops::task_ops::partition;
use crate::tui::app::App;
use crate::tui::text_edit::{display_width, truncate_to_width};

use super::helpers::{checkbox, due_label, pad_line, spans_width};

/// Shown in the To-do section when nothing is left to do
pub const EMPTY_TODO_MESSAGE: &str = "Nothing to do";

/// Render the list screen: header, grouped rows, the Add Task action
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // rows
            Constraint::Length(1), // add action + hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_rows(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let groups = partition(app.store.tasks());

    let left = vec![Span::styled(
        " Tasks",
        Style::default()
            .fg(app.theme.text)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let counts = format!(
        "{} to do \u{00B7} {} done ",
        groups.incomplete.len(),
        groups.completed.len()
    );
    let right = vec![Span::styled(counts, Style::default().fg(app.theme.dim).bg(bg))];

    let lines = vec![
        pad_line(left, right, width, bg),
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.surface).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

/// Build every content line, tagged with the display index of the task it
/// belongs to (None for headers and spacing)
fn build_lines(app: &App, width: usize) -> Vec<(Option<usize>, Line<'static>)> {
    let bg = app.theme.background;
    let groups = partition(app.store.tasks());
    let section_style = Style::default()
        .fg(app.theme.label)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<(Option<usize>, Line<'static>)> = Vec::new();

    lines.push((None, Line::from(Span::styled(" To-do", section_style))));
    if groups.incomplete.is_empty() {
        lines.push((
            None,
            Line::from(Span::styled(
                format!("     {}", EMPTY_TODO_MESSAGE),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ));
    }
    for (i, task) in groups.incomplete.iter().enumerate() {
        push_task_lines(&mut lines, app, task, i, width);
    }

    if !groups.completed.is_empty() {
        lines.push((None, Line::from("")));
        lines.push((None, Line::from(Span::styled(" Completed", section_style))));
        let offset = groups.incomplete.len();
        for (i, task) in groups.completed.iter().enumerate() {
            push_task_lines(&mut lines, app, task, offset + i, width);
        }
    }

    lines
}

fn push_task_lines(
    lines: &mut Vec<(Option<usize>, Line<'static>)>,
    app: &App,
    task: &Task,
    index: usize,
    width: usize,
) {
    let theme = &app.theme;
    let is_cursor = index == app.list.cursor;
    let bg = if is_cursor {
        theme.highlight
    } else {
        theme.background
    };

    let check_color = if task.completed { theme.accent } else { theme.dim };
    let left_prefix = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(checkbox(task.completed), Style::default().fg(check_color).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
    ];

    let mut right = vec![Span::styled(
        task.priority.label(),
        Style::default()
            .fg(theme.priority_color(task.priority))
            .bg(bg),
    )];
    if let Some(due) = task.due_date {
        right.push(Span::styled("  ", Style::default().bg(bg)));
        right.push(Span::styled(
            due_label(due),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    right.push(Span::styled(" ", Style::default().bg(bg)));

    let mut title_style = if task.completed {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.text).bg(bg)
    };
    if is_cursor {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let room = width
        .saturating_sub(spans_width(&left_prefix))
        .saturating_sub(spans_width(&right))
        .saturating_sub(1);
    let title = truncate_to_width(&task.title, room);

    let mut left = left_prefix;
    left.push(Span::styled(title, title_style));
    lines.push((Some(index), pad_line(left, right, width, bg)));

    // First line of the description, dimmed and indented
    if let Some(first) = task.description.lines().find(|l| !l.trim().is_empty()) {
        let room = width.saturating_sub(6);
        lines.push((
            Some(index),
            Line::from(vec![
                Span::styled("     ", Style::default().bg(theme.background)),
                Span::styled(
                    truncate_to_width(first.trim(), room),
                    Style::default().fg(theme.dim).bg(theme.background),
                ),
            ]),
        ));
    }
}

fn render_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width as usize;
    let height = area.height as usize;
    let lines = build_lines(app, width);

    // Keep the cursor's lines on screen; show the To-do header when at the top
    let cursor = app.list.cursor;
    let first = lines.iter().position(|(idx, _)| *idx == Some(cursor));
    let last = lines.iter().rposition(|(idx, _)| *idx == Some(cursor));
    if let (Some(first), Some(last)) = (first, last) {
        let first = if cursor == 0 { 0 } else { first };
        if first < app.list.scroll {
            app.list.scroll = first;
        }
        if height > 0 && last >= app.list.scroll + height {
            app.list.scroll = last + 1 - height;
        }
    }
    app.list.scroll = app.list.scroll.min(lines.len().saturating_sub(1));

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.list.scroll)
        .take(height)
        .map(|(_, line)| line)
        .collect();

    let paragraph = Paragraph::new(visible).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            " + Add Task ",
            Style::default()
                .fg(app.theme.on_accent)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if app.show_key_hints {
        let used = spans_width(&spans);
        let hints = "  a add  \u{2423} done  e edit  d delete  ? help  q quit";
        let room = width.saturating_sub(used);
        if display_width(hints) <= room {
            spans.push(Span::styled(hints, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
