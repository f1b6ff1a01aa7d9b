use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Everything a key can do on the list screen. Each key maps to at most one
/// command, so a delete can never also open the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Up,
    Down,
    Top,
    Bottom,
    ToggleComplete,
    Delete,
    Edit,
    AddTask,
    Help,
    Quit,
}

pub fn list_command(key: KeyEvent) -> Option<ListCommand> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ListCommand::Up,
        KeyCode::Down | KeyCode::Char('j') => ListCommand::Down,
        KeyCode::Home | KeyCode::Char('g') => ListCommand::Top,
        KeyCode::End | KeyCode::Char('G') => ListCommand::Bottom,
        KeyCode::Char(' ') | KeyCode::Char('x') => ListCommand::ToggleComplete,
        KeyCode::Delete | KeyCode::Char('d') => ListCommand::Delete,
        KeyCode::Enter | KeyCode::Char('e') => ListCommand::Edit,
        KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('+') => ListCommand::AddTask,
        KeyCode::Char('?') => ListCommand::Help,
        KeyCode::Char('q') => ListCommand::Quit,
        _ => return None,
    };
    Some(cmd)
}

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    let Some(cmd) = list_command(key) else {
        return;
    };
    match cmd {
        ListCommand::Up => app.move_cursor(-1),
        ListCommand::Down => app.move_cursor(1),
        ListCommand::Top => app.list.cursor = 0,
        ListCommand::Bottom => app.list.cursor = app.store.tasks().len().saturating_sub(1),
        ListCommand::ToggleComplete => app.toggle_selected(),
        ListCommand::Delete => app.delete_selected(),
        ListCommand::Edit => app.edit_selected(),
        ListCommand::AddTask => app.open_new_task_form(),
        ListCommand::Help => app.show_help = true,
        ListCommand::Quit => app.should_quit = true,
    }
}
