use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::model::Priority;
use crate::ops::task_ops::Mode;
use crate::tui::app::{App, FormField, FormState};
use crate::tui::text_edit::{display_width, line_and_col, truncate_to_width, visible_window};
use crate::tui::theme::Theme;

use super::helpers::{due_label, pad_line, spans_width};

pub const DESCRIPTION_PLACEHOLDER: &str = "Add a description...";
pub const DUE_PLACEHOLDER: &str = "Select a date";

/// Render the create/edit form
pub fn render_form_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let editing = matches!(app.mode(), Mode::Form { editing: Some(_) });
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header + separator
            Constraint::Length(1),
            Constraint::Length(1), // title label
            Constraint::Length(3), // title input
            Constraint::Length(1), // description label
            Constraint::Length(5), // description input
            Constraint::Length(1), // priority label
            Constraint::Length(1), // priority radios
            Constraint::Length(1),
            Constraint::Length(1), // due label
            Constraint::Length(3), // due picker
            Constraint::Min(0),
            Constraint::Length(1), // submit button
        ])
        .split(area);

    render_header(frame, theme, form, editing, chunks[0]);

    let body = |r: Rect| inset(r, 1);
    render_label(frame, theme, "Task Title", form.focus == FormField::Title, body(chunks[2]));
    render_title_input(frame, theme, form, body(chunks[3]));
    render_label(
        frame,
        theme,
        "Description (optional)",
        form.focus == FormField::Description,
        body(chunks[4]),
    );
    render_description_input(frame, theme, form, body(chunks[5]));
    render_label(frame, theme, "Priority", form.focus == FormField::Priority, body(chunks[6]));
    render_priority_row(frame, theme, form, body(chunks[7]));
    render_label(frame, theme, "Due Date", form.focus == FormField::DueDate, body(chunks[9]));
    render_due_picker(frame, theme, form, body(chunks[10]));
    render_submit(frame, theme, form, editing, chunks[12]);
}

/// Shrink a rect horizontally by `margin` cells on each side
fn inset(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

/// "Esc ✕" on the left, the screen title centered, "Save" on the right
fn render_header(frame: &mut Frame, theme: &Theme, form: &FormState, editing: bool, area: Rect) {
    let bg = theme.background;
    let width = area.width as usize;
    let title = if editing { "Edit Task" } else { "New Task" };

    let left = vec![Span::styled(" Esc \u{2715}", Style::default().fg(theme.dim).bg(bg))];
    let save_style = if form.draft.can_save() {
        Style::default()
            .fg(theme.accent)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.placeholder).bg(bg)
    };
    let right = vec![Span::styled("Save ", save_style)];

    let left_w = spans_width(&left);
    let title_w = display_width(title);
    let centered = width.saturating_sub(title_w) / 2;
    let mut middle = Vec::new();
    if centered > left_w {
        middle.push(Span::styled(
            " ".repeat(centered - left_w),
            Style::default().bg(bg),
        ));
    }
    middle.push(Span::styled(
        title,
        Style::default()
            .fg(theme.text)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));

    let mut left = left;
    left.extend(middle);
    let lines = vec![
        pad_line(left, right, width, bg),
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(theme.surface).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_label(frame: &mut Frame, theme: &Theme, text: &str, focused: bool, area: Rect) {
    let fg = if focused { theme.accent } else { theme.label };
    let mut style = Style::default().fg(fg).bg(theme.background);
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(Paragraph::new(Span::styled(text.to_string(), style)), area);
}

fn input_block(theme: &Theme, focused: bool) -> Block<'static> {
    let border = if focused { theme.accent } else { theme.surface };
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(theme.background))
        .style(Style::default().bg(theme.surface))
}

fn render_title_input(frame: &mut Frame, theme: &Theme, form: &FormState, area: Rect) {
    let focused = form.focus == FormField::Title;
    let block = input_block(theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (shown, col) = visible_window(&form.draft.title, form.title_cursor, inner.width as usize);
    frame.render_widget(
        Paragraph::new(Span::styled(
            shown,
            Style::default().fg(theme.text).bg(theme.surface),
        )),
        inner,
    );
    if focused && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position((inner.x + col as u16, inner.y));
    }
}

/// First line to show so that `line` stays inside a viewport of `height`
pub(super) fn scroll_top(line: usize, height: usize) -> usize {
    if height == 0 {
        return line;
    }
    (line + 1).saturating_sub(height)
}

fn render_description_input(frame: &mut Frame, theme: &Theme, form: &FormState, area: Rect) {
    let focused = form.focus == FormField::Description;
    let block = input_block(theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let text = &form.draft.description;
    let width = inner.width as usize;
    let text_style = Style::default().fg(theme.text).bg(theme.surface);

    if text.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_to_width(DESCRIPTION_PLACEHOLDER, width),
                Style::default().fg(theme.placeholder).bg(theme.surface),
            )),
            inner,
        );
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let cursor = form.description_cursor.min(text.len());
    let (cursor_line, _) = line_and_col(text, cursor);
    let line_start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);
    let top = if focused {
        scroll_top(cursor_line, inner.height as usize)
    } else {
        0
    };

    let mut cursor_col = 0;
    let lines: Vec<Line> = text
        .split('\n')
        .enumerate()
        .skip(top)
        .take(inner.height as usize)
        .map(|(i, line)| {
            if focused && i == cursor_line {
                let (shown, col) = visible_window(line, cursor - line_start, width);
                cursor_col = col;
                Line::from(Span::styled(shown, text_style))
            } else {
                Line::from(Span::styled(truncate_to_width(line, width), text_style))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused {
        let y = inner.y + (cursor_line - top) as u16;
        frame.set_cursor_position((inner.x + cursor_col as u16, y));
    }
}

/// `(•) Low   ( ) Medium   ( ) High`
fn render_priority_row(frame: &mut Frame, theme: &Theme, form: &FormState, area: Rect) {
    let bg = theme.background;
    let focused = form.focus == FormField::Priority;
    let mut spans = Vec::new();
    for (i, priority) in Priority::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("   ", Style::default().bg(bg)));
        }
        let selected = priority == form.draft.priority;
        let marker = if selected { "(\u{2022}) " } else { "( ) " };
        let mut style = if selected {
            Style::default().fg(theme.priority_color(priority)).bg(bg)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        if selected && focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(format!("{}{}", marker, priority.label()), style));
    }
    if focused {
        let hint = "  \u{2190}/\u{2192} choose";
        if spans_width(&spans) + display_width(hint) <= area.width as usize {
            spans.push(Span::styled(hint, Style::default().fg(theme.dim).bg(bg)));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_due_picker(frame: &mut Frame, theme: &Theme, form: &FormState, area: Rect) {
    let focused = form.focus == FormField::DueDate;
    let block = input_block(theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface = theme.surface;
    let left = match form.draft.due_date {
        Some(date) => vec![Span::styled(
            due_label(date),
            Style::default().fg(theme.text).bg(surface),
        )],
        None => vec![Span::styled(
            DUE_PLACEHOLDER,
            Style::default().fg(theme.placeholder).bg(surface),
        )],
    };
    let width = inner.width as usize;
    let mut right = Vec::new();
    if focused {
        let hint = "\u{2190}/\u{2192} day  PgUp/PgDn month  t today";
        if spans_width(&left) + display_width(hint) + 2 <= width {
            right.push(Span::styled(hint, Style::default().fg(theme.dim).bg(surface)));
        }
    }
    frame.render_widget(Paragraph::new(pad_line(left, right, width, surface)), inner);
}

fn render_submit(frame: &mut Frame, theme: &Theme, form: &FormState, editing: bool, area: Rect) {
    let label = if editing { " Update Task " } else { " Add Task " };
    let mut style = if form.draft.can_save() {
        Style::default().fg(theme.on_accent).bg(theme.accent)
    } else {
        Style::default().fg(theme.dim).bg(theme.surface)
    };
    if form.focus == FormField::Submit {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(label, style))
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.background)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use chrono::NaiveDate;

    fn render(app: &App) -> (String, ratatui::buffer::Buffer) {
        render_with_buffer(TERM_W, TERM_H, |frame, area| {
            render_form_view(frame, app, area);
        })
    }

    #[test]
    fn new_task_form_shows_defaults() {
        let mut app = seeded_app();
        app.open_new_task_form();
        let (output, _) = render(&app);

        let header = output.lines().next().unwrap();
        assert!(header.starts_with(" Esc \u{2715}"));
        assert!(header.contains("New Task"));
        assert!(header.ends_with("Save"));

        for text in [
            "Task Title",
            "Description (optional)",
            DESCRIPTION_PLACEHOLDER,
            "Priority",
            "( ) Low   (\u{2022}) Medium   ( ) High",
            "Due Date",
            DUE_PLACEHOLDER,
            "Add Task",
        ] {
            assert!(output.contains(text), "missing {:?}", text);
        }
        assert!(!output.contains("Update Task"));
    }

    #[test]
    fn edit_form_shows_task_values() {
        let mut app = seeded_app();
        let id = app.store.tasks()[0].id;
        let mut fields = app.store.tasks()[0].fields();
        fields.description = "Hero section first".into();
        fields.due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        app.store.update_task(id, fields).unwrap();
        app.open_edit_form(id);

        let (output, _) = render(&app);
        assert!(output.lines().next().unwrap().contains("Edit Task"));
        assert!(output.contains("Design the new homepage"));
        assert!(output.contains("Hero section first"));
        assert!(output.contains("(\u{2022}) High"));
        assert!(output.contains("2024-07-01"));
        assert!(output.contains("Update Task"));
        assert!(!output.contains(DESCRIPTION_PLACEHOLDER));
        assert!(!output.contains(DUE_PLACEHOLDER));
    }

    #[test]
    fn save_is_dimmed_until_title_present() {
        let mut app = seeded_app();
        app.open_new_task_form();
        let (_, buf) = render(&app);
        let (x, y) = find_text(&buf, "Save").unwrap();
        assert_eq!(buf[(x, y)].fg, app.theme.placeholder);

        app.form.as_mut().unwrap().draft.title = "Ship it".into();
        let (_, buf) = render(&app);
        let (x, y) = find_text(&buf, "Save").unwrap();
        assert_eq!(buf[(x, y)].fg, app.theme.accent);
    }

    #[test]
    fn whitespace_title_cannot_save() {
        let mut app = seeded_app();
        app.open_new_task_form();
        app.form.as_mut().unwrap().draft.title = "   ".into();
        let (_, buf) = render(&app);
        let (x, y) = find_text(&buf, "Save").unwrap();
        assert_eq!(buf[(x, y)].fg, app.theme.placeholder);
    }

    #[test]
    fn focused_label_uses_accent() {
        let mut app = seeded_app();
        app.open_new_task_form();
        app.form.as_mut().unwrap().focus = FormField::DueDate;
        let (output, buf) = render(&app);
        let (x, y) = find_text(&buf, "Due Date").unwrap();
        assert_eq!(buf[(x, y)].fg, app.theme.accent);
        let (x, y) = find_text(&buf, "Task Title").unwrap();
        assert_eq!(buf[(x, y)].fg, app.theme.label);
        assert!(output.contains("PgUp/PgDn month"));
    }

    #[test]
    fn long_title_scrolls_to_cursor() {
        let mut app = seeded_app();
        app.open_new_task_form();
        let form = app.form.as_mut().unwrap();
        form.draft.title = format!("{}END", "x".repeat(120));
        form.title_cursor = form.draft.title.len();
        let (output, _) = render(&app);
        assert!(output.contains("xEND"));
    }

    #[test]
    fn description_shows_multiple_lines() {
        let mut app = seeded_app();
        app.open_new_task_form();
        let form = app.form.as_mut().unwrap();
        form.draft.description = "one\ntwo\nthree".into();
        form.description_cursor = 0;
        let (output, _) = render(&app);
        assert!(output.contains("one"));
        assert!(output.contains("two"));
        assert!(output.contains("three"));
    }

    #[test]
    fn scroll_top_keeps_line_visible() {
        assert_eq!(scroll_top(0, 3), 0);
        assert_eq!(scroll_top(2, 3), 0);
        assert_eq!(scroll_top(3, 3), 1);
        assert_eq!(scroll_top(7, 3), 5);
    }
}
