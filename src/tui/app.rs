use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::model::{TaskId, UiConfig};
use crate::ops::draft::Draft;
use crate::ops::task_ops::{Mode, Store, TaskError, partition};

use super::input;
use super::render;
use super::theme::Theme;

/// A field of the task form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::DueDate,
        FormField::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field, wrapping to the first
    pub fn next(self) -> FormField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous field, wrapping to the last
    pub fn prev(self) -> FormField {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }
}

/// Form screen state: the draft plus the cursors of its text fields
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: Draft,
    pub focus: FormField,
    /// Byte offset into `draft.title`
    pub title_cursor: usize,
    /// Byte offset into `draft.description`
    pub description_cursor: usize,
}

impl FormState {
    pub fn new(draft: Draft) -> Self {
        FormState {
            title_cursor: draft.title.len(),
            description_cursor: draft.description.len(),
            draft,
            focus: FormField::Title,
        }
    }
}

/// List screen cursor and scroll
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Index into the display order (to-do rows first, then completed)
    pub cursor: usize,
    /// First visible content line
    pub scroll: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-shot message for the status row, cleared on the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state
pub struct App {
    pub store: Store,
    /// Present exactly while the store is in form mode
    pub form: Option<FormState>,
    pub list: ListState,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub show_help: bool,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    /// Date the due-date picker starts from; fixed in tests
    pub today: NaiveDate,
}

impl App {
    pub fn new(store: Store, ui: &UiConfig) -> Self {
        App {
            store,
            form: None,
            list: ListState::default(),
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            show_help: false,
            status: None,
            should_quit: false,
            today: Local::now().date_naive(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    /// Task ids in the order the list shows them
    pub fn display_order(&self) -> Vec<TaskId> {
        partition(self.store.tasks()).display_order()
    }

    /// Task under the list cursor
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.display_order().get(self.list.cursor).copied()
    }

    /// Put the list cursor on a task, wherever its group placed it
    pub fn select_task(&mut self, id: TaskId) {
        if let Some(pos) = self.display_order().iter().position(|t| *t == id) {
            self.list.cursor = pos;
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.store.tasks().len();
        self.list.cursor = self.list.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.store.tasks().len();
        if len == 0 {
            return;
        }
        let next = self.list.cursor as isize + delta;
        self.list.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    // -----------------------------------------------------------------------
    // List actions
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.store.toggle_complete(id).is_some() {
            self.select_task(id);
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if self.store.delete_task(id) {
            self.set_status(StatusKind::Info, "Task deleted");
            self.clamp_cursor();
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.open_edit_form(id);
        }
    }

    // -----------------------------------------------------------------------
    // Screen transitions
    // -----------------------------------------------------------------------

    pub fn open_new_task_form(&mut self) {
        self.store.open_new_task_form();
        self.form = Some(FormState::new(Draft::for_store(&self.store)));
    }

    pub fn open_edit_form(&mut self, id: TaskId) {
        if self.store.open_edit_form(id) {
            self.form = Some(FormState::new(Draft::for_store(&self.store)));
        }
    }

    /// Leave the form, dropping the draft
    pub fn cancel_form(&mut self) {
        self.store.cancel_form();
        self.form = None;
    }

    /// Commit the form. A blank title keeps the form open with an error.
    pub fn save_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let editing = matches!(self.store.mode(), Mode::Form { editing: Some(_) });
        match form.draft.submit(&mut self.store) {
            Ok(id) => {
                info!(%id, editing, "form saved");
                self.form = None;
                self.select_task(id);
                let msg = if editing { "Task updated" } else { "Task added" };
                self.set_status(StatusKind::Info, msg);
            }
            Err(TaskError::EmptyTitle) => {
                form.focus = FormField::Title;
                self.set_status(StatusKind::Error, "Title is required");
            }
            Err(e @ TaskError::NotFound(_)) => {
                warn!(error = %e, "edited task vanished");
                self.cancel_form();
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }
}

/// Run the TUI application
pub fn run(store: Store, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    info!(tasks = app.store.tasks().len(), "tui started");
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!("tui stopped");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
