mod form;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use crate::ops::task_ops::Mode;

pub use list::{ListCommand, list_command};

/// Handle a key event on the current screen
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);
    app.status = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts everything; ? or Esc closes it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.mode() {
        Mode::List => list::handle_list(app, key),
        Mode::Form { .. } => form::handle_form(app, key),
    }
}

/// Handle a bracketed paste. Only text fields of the form take pasted text.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    form::paste(app, text);
}

/// Shifted letters already arrive upper-cased; drop SHIFT so patterns stay simple
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
