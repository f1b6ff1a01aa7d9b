use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Priority;
use crate::tui::app::{App, FormField, FormState};
use crate::tui::text_edit::TextEdit;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Screen-level keys first
    match (ctrl, key.code) {
        (_, KeyCode::Esc) => {
            app.cancel_form();
            return;
        }
        (true, KeyCode::Char('s')) => {
            app.save_form();
            return;
        }
        (_, KeyCode::Tab) => {
            focus(app, |f| f.next());
            return;
        }
        (_, KeyCode::BackTab) => {
            focus(app, |f| f.prev());
            return;
        }
        _ => {}
    }

    let Some(field) = app.form.as_ref().map(|f| f.focus) else {
        return;
    };
    match field {
        FormField::Title => handle_title(app, key),
        FormField::Description => handle_description(app, key),
        FormField::Priority => handle_priority(app, key),
        FormField::DueDate => handle_due_date(app, key),
        FormField::Submit => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.save_form();
            } else {
                handle_vertical(app, key);
            }
        }
    }
}

/// Pasted text goes into the focused text field
pub(super) fn paste(app: &mut App, text: &str) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    match form.focus {
        FormField::Title => {
            TextEdit::single_line(&mut form.draft.title, &mut form.title_cursor).insert_str(text)
        }
        FormField::Description => TextEdit::multi_line(
            &mut form.draft.description,
            &mut form.description_cursor,
        )
        .insert_str(text),
        _ => {}
    }
}

fn focus(app: &mut App, step: impl FnOnce(FormField) -> FormField) {
    if let Some(form) = app.form.as_mut() {
        form.focus = step(form.focus);
    }
}

/// Up/Down between fields (no wrap-around)
fn handle_vertical(app: &mut App, key: KeyEvent) -> bool {
    let Some(form) = app.form.as_mut() else {
        return false;
    };
    match key.code {
        KeyCode::Down if form.focus != FormField::Submit => {
            form.focus = form.focus.next();
            true
        }
        KeyCode::Up if form.focus != FormField::Title => {
            form.focus = form.focus.prev();
            true
        }
        _ => false,
    }
}

/// Line-editing keys shared by the title and description fields.
/// Returns false when the key is not an editing key.
fn apply_edit(edit: &mut TextEdit, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Left if ctrl || alt => edit.word_left(),
        KeyCode::Right if ctrl || alt => edit.word_right(),
        KeyCode::Left => edit.left(),
        KeyCode::Right => edit.right(),
        KeyCode::Home => edit.home(),
        KeyCode::End => edit.end(),
        KeyCode::Backspace if ctrl || alt => edit.delete_word_back(),
        KeyCode::Backspace => edit.backspace(),
        KeyCode::Delete => edit.delete(),
        KeyCode::Char('a') if ctrl => edit.home(),
        KeyCode::Char('e') if ctrl => edit.end(),
        KeyCode::Char('w') if ctrl => edit.delete_word_back(),
        KeyCode::Char('u') if ctrl => edit.kill_to_line_start(),
        KeyCode::Char(c) if !ctrl && !alt => edit.insert_char(c),
        _ => return false,
    }
    true
}

fn handle_title(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.save_form();
        return;
    }
    if handle_vertical(app, key) {
        return;
    }
    if let Some(FormState {
        draft,
        title_cursor,
        ..
    }) = app.form.as_mut()
    {
        apply_edit(
            &mut TextEdit::single_line(&mut draft.title, title_cursor),
            key,
        );
    }
}

fn handle_description(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let mut edit = TextEdit::multi_line(&mut form.draft.description, &mut form.description_cursor);
    let moved_out = match key.code {
        KeyCode::Enter => {
            edit.insert_char('\n');
            false
        }
        KeyCode::Up => !edit.up(),
        KeyCode::Down => !edit.down(),
        _ => {
            apply_edit(&mut edit, key);
            false
        }
    };
    if moved_out {
        handle_vertical(app, key);
    }
}

fn handle_priority(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.save_form();
        return;
    }
    if handle_vertical(app, key) {
        return;
    }
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let current = form.draft.priority;
    let next = match key.code {
        KeyCode::Left => current.lower(),
        KeyCode::Right => current.raise(),
        KeyCode::Char('l') | KeyCode::Char('1') => Priority::Low,
        KeyCode::Char('m') | KeyCode::Char('2') => Priority::Medium,
        KeyCode::Char('h') | KeyCode::Char('3') => Priority::High,
        _ => return,
    };
    form.draft.set_priority(next);
}

fn handle_due_date(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.save_form();
        return;
    }
    if handle_vertical(app, key) {
        return;
    }
    let today = app.today;
    let Some(form) = app.form.as_mut() else {
        return;
    };
    let draft = &mut form.draft;
    match key.code {
        KeyCode::Left => draft.shift_due_days(-1, today),
        KeyCode::Right => draft.shift_due_days(1, today),
        KeyCode::PageUp => draft.shift_due_months(-1, today),
        KeyCode::PageDown => draft.shift_due_months(1, today),
        KeyCode::Char('t') => draft.set_due_today(today),
        KeyCode::Backspace | KeyCode::Delete => draft.clear_due(),
        _ => {}
    }
}
