pub mod form_view;
pub mod help_overlay;
mod helpers;
pub mod list_view;
pub mod status_row;
#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;
use crate::ops::task_ops::Mode;

/// Main render function; dispatches to the screen for the current mode
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    match app.mode() {
        Mode::List => list_view::render_list_view(frame, app, chunks[0]),
        Mode::Form { .. } => form_view::render_form_view(frame, app, chunks[0]),
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[1]);
}
