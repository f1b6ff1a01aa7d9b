use tracing::{debug, warn};

use crate::model::config::SeedTask;
use crate::model::task::{Task, TaskFields, TaskId};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("title is required")]
    EmptyTitle,
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// A seed entry the store refused, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("seed task #{index}: {source}")]
pub struct SeedError {
    pub index: usize,
    pub source: TaskError,
}

/// Which screen the controller is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    /// Composing a new task (`editing: None`) or editing an existing one
    Form { editing: Option<TaskId> },
}

/// A controller command, for callers that drive the store as a reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTask(TaskFields),
    UpdateTask(TaskId, TaskFields),
    ToggleComplete(TaskId),
    DeleteTask(TaskId),
    OpenNewTaskForm,
    OpenEditForm(TaskId),
    CancelForm,
}

/// What a dispatched action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added(TaskId),
    Updated(TaskId),
    Toggled { id: TaskId, completed: bool },
    Deleted(TaskId),
    ModeChanged(Mode),
    /// The action referenced a task that is not in the collection
    Unchanged,
}

/// The in-memory task collection plus the current screen.
///
/// Every mutation goes through the methods below; nothing else holds a
/// mutable reference to `tasks`.
#[derive(Debug, Clone)]
pub struct Store {
    tasks: Vec<Task>,
    mode: Mode,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Store {
    /// An empty store in list mode
    pub fn new() -> Self {
        Store {
            tasks: Vec::new(),
            mode: Mode::List,
            next_id: 1,
        }
    }

    /// Build a store from seed entries, keeping their order (first entry on top).
    /// Seeds with a blank title are rejected.
    pub fn with_seed(seed: &[SeedTask]) -> Result<Self, SeedError> {
        let mut store = Store::new();
        for (i, entry) in seed.iter().enumerate() {
            let fields = entry.fields();
            if !fields.has_title() {
                return Err(SeedError {
                    index: i + 1,
                    source: TaskError::EmptyTitle,
                });
            }
            let id = store.fresh_id();
            let mut task = Task::new(id, fields);
            task.completed = entry.completed;
            store.tasks.push(task);
        }
        debug!(count = store.tasks.len(), "store seeded");
        Ok(store)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task referenced by the current form, if editing one
    pub fn editing_task(&self) -> Option<&Task> {
        match self.mode {
            Mode::Form { editing: Some(id) } => self.get(id),
            _ => None,
        }
    }

    fn fresh_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a task at the top of the list and return to the list screen.
    /// A blank title leaves the store untouched.
    pub fn add_task(&mut self, fields: TaskFields) -> Result<TaskId, TaskError> {
        if !fields.has_title() {
            warn!("add rejected: blank title");
            return Err(TaskError::EmptyTitle);
        }
        let id = self.fresh_id();
        self.tasks.insert(0, Task::new(id, fields));
        self.mode = Mode::List;
        debug!(%id, "task added");
        Ok(id)
    }

    /// Replace a task's editable fields in place and return to the list screen.
    /// The id and completion flag are kept.
    pub fn update_task(&mut self, id: TaskId, fields: TaskFields) -> Result<(), TaskError> {
        let idx = self.position(id).ok_or(TaskError::NotFound(id))?;
        if !fields.has_title() {
            warn!(%id, "update rejected: blank title");
            return Err(TaskError::EmptyTitle);
        }
        self.tasks[idx].apply(fields);
        self.mode = Mode::List;
        debug!(%id, "task updated");
        Ok(())
    }

    /// Flip a task's completed flag. Returns the new value, or `None` if absent.
    pub fn toggle_complete(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "task toggled");
        Some(task.completed)
    }

    /// Remove a task. Returns whether anything was removed.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.tasks.remove(idx);
        if self.mode == (Mode::Form { editing: Some(id) }) {
            self.mode = Mode::List;
        }
        debug!(%id, "task deleted");
        true
    }

    // -----------------------------------------------------------------------
    // Mode transitions
    // -----------------------------------------------------------------------

    pub fn open_new_task_form(&mut self) {
        self.mode = Mode::Form { editing: None };
    }

    /// Switch to the form for an existing task. Unknown ids are ignored.
    pub fn open_edit_form(&mut self, id: TaskId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        self.mode = Mode::Form { editing: Some(id) };
        true
    }

    pub fn cancel_form(&mut self) {
        self.mode = Mode::List;
    }

    /// Apply an action and report what changed
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, TaskError> {
        let outcome = match action {
            Action::AddTask(fields) => Outcome::Added(self.add_task(fields)?),
            Action::UpdateTask(id, fields) => {
                self.update_task(id, fields)?;
                Outcome::Updated(id)
            }
            Action::ToggleComplete(id) => match self.toggle_complete(id) {
                Some(completed) => Outcome::Toggled { id, completed },
                None => Outcome::Unchanged,
            },
            Action::DeleteTask(id) => {
                if self.delete_task(id) {
                    Outcome::Deleted(id)
                } else {
                    Outcome::Unchanged
                }
            }
            Action::OpenNewTaskForm => {
                self.open_new_task_form();
                Outcome::ModeChanged(self.mode)
            }
            Action::OpenEditForm(id) => {
                if self.open_edit_form(id) {
                    Outcome::ModeChanged(self.mode)
                } else {
                    Outcome::Unchanged
                }
            }
            Action::CancelForm => {
                self.cancel_form();
                Outcome::ModeChanged(self.mode)
            }
        };
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Tasks split by completion state, each group in store order
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub incomplete: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl Partition<'_> {
    /// Task ids in display order: to-do first, then completed
    pub fn display_order(&self) -> Vec<TaskId> {
        self.incomplete
            .iter()
            .chain(self.completed.iter())
            .map(|t| t.id)
            .collect()
    }
}

pub fn partition(tasks: &[Task]) -> Partition<'_> {
    let (completed, incomplete): (Vec<&Task>, Vec<&Task>) =
        tasks.iter().partition(|t| t.completed);
    Partition {
        incomplete,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::default_seed;
    use crate::model::task::Priority;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn fields(title: &str) -> TaskFields {
        TaskFields::new(title)
    }

    fn seeded() -> Store {
        Store::with_seed(&default_seed()).unwrap()
    }

    #[test]
    fn test_seed_order_and_ids() {
        let seed = vec![
            SeedTask {
                title: "First".into(),
                description: String::new(),
                due_date: None,
                priority: Priority::Low,
                completed: false,
            },
            SeedTask {
                title: "Second".into(),
                description: String::new(),
                due_date: None,
                priority: Priority::High,
                completed: true,
            },
        ];
        let store = Store::with_seed(&seed).unwrap();
        assert_eq!(store.tasks()[0].title, "First");
        assert_eq!(store.tasks()[1].title, "Second");
        assert!(store.tasks()[1].completed);
        assert_ne!(store.tasks()[0].id, store.tasks()[1].id);
        assert_eq!(store.mode(), Mode::List);
    }

    #[test]
    fn test_seed_rejects_blank_title() {
        let mut seed = default_seed();
        seed[0].title = "   ".into();
        assert_eq!(
            Store::with_seed(&seed).unwrap_err(),
            SeedError {
                index: 1,
                source: TaskError::EmptyTitle
            }
        );
    }

    #[test]
    fn test_seed_error_names_failing_entry() {
        let mut seed = default_seed();
        seed.extend(default_seed());
        seed.push(SeedTask {
            title: String::new(),
            ..default_seed().remove(0)
        });
        let err = Store::with_seed(&seed).unwrap_err();
        assert_eq!(err.index, 3);
        assert_eq!(err.to_string(), "seed task #3: title is required");
    }

    #[test]
    fn test_add_many_unique_ids() {
        let mut store = Store::new();
        for i in 0..50 {
            store.add_task(fields(&format!("Task {}", i))).unwrap();
        }
        assert_eq!(store.tasks().len(), 50);
        let ids: HashSet<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_prepends_and_returns_to_list() {
        let mut store = seeded();
        store.open_new_task_form();
        let id = store.add_task(fields("Newest")).unwrap();
        assert_eq!(store.tasks()[0].id, id);
        assert_eq!(store.tasks()[1].title, "Design the new homepage");
        assert_eq!(store.mode(), Mode::List);
    }

    #[test]
    fn test_add_blank_title_is_noop() {
        let mut store = seeded();
        store.open_new_task_form();
        let before = store.tasks().to_vec();
        assert_eq!(store.add_task(fields("")), Err(TaskError::EmptyTitle));
        assert_eq!(store.add_task(fields(" \t\n")), Err(TaskError::EmptyTitle));
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.mode(), Mode::Form { editing: None });
    }

    #[test]
    fn test_add_keeps_title_verbatim() {
        let mut store = Store::new();
        store.add_task(fields("  padded  ")).unwrap();
        assert_eq!(store.tasks()[0].title, "  padded  ");
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = seeded();
        let id = store.tasks()[0].id;
        assert_eq!(store.toggle_complete(id), Some(true));
        assert_eq!(store.toggle_complete(id), Some(false));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_missing_and_mode_untouched() {
        let mut store = seeded();
        store.open_new_task_form();
        assert_eq!(store.toggle_complete(TaskId(999)), None);
        let id = store.tasks()[0].id;
        store.toggle_complete(id);
        assert_eq!(store.mode(), Mode::Form { editing: None });
    }

    #[test]
    fn test_delete_twice_second_is_noop() {
        let mut store = seeded();
        store.add_task(fields("Other")).unwrap();
        let id = store.tasks()[1].id;
        assert!(store.delete_task(id));
        let after_first = store.tasks().to_vec();
        assert!(!store.delete_task(id));
        assert_eq!(store.tasks(), after_first.as_slice());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_delete_edited_task_leaves_form() {
        let mut store = seeded();
        let id = store.tasks()[0].id;
        store.open_edit_form(id);
        assert!(store.delete_task(id));
        assert_eq!(store.mode(), Mode::List);
        assert!(store.editing_task().is_none());
    }

    #[test]
    fn test_update_replaces_fields_keeps_identity() {
        let mut store = seeded();
        let id = store.tasks()[0].id;
        store.toggle_complete(id);
        store.open_edit_form(id);
        let new_fields = TaskFields {
            title: "Redesign".into(),
            description: "Hero section first".into(),
            due_date: NaiveDate::from_ymd_opt(2024, 10, 3),
            priority: Priority::Low,
        };
        store.update_task(id, new_fields.clone()).unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.id, id);
        assert!(task.completed);
        assert_eq!(task.fields(), new_fields);
        assert_eq!(store.mode(), Mode::List);
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = seeded();
        store.open_new_task_form();
        let before = store.tasks().to_vec();
        let err = store.update_task(TaskId(42), fields("Ghost")).unwrap_err();
        assert_eq!(err, TaskError::NotFound(TaskId(42)));
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.mode(), Mode::Form { editing: None });
    }

    #[test]
    fn test_update_blank_title_keeps_form_open() {
        let mut store = seeded();
        let id = store.tasks()[0].id;
        store.open_edit_form(id);
        assert_eq!(store.update_task(id, fields(" ")), Err(TaskError::EmptyTitle));
        assert_eq!(store.get(id).unwrap().title, "Design the new homepage");
        assert_eq!(store.mode(), Mode::Form { editing: Some(id) });
    }

    #[test]
    fn test_open_edit_form_unknown_id() {
        let mut store = seeded();
        assert!(!store.open_edit_form(TaskId(77)));
        assert_eq!(store.mode(), Mode::List);
    }

    #[test]
    fn test_editing_task_resolves() {
        let mut store = seeded();
        let id = store.tasks()[0].id;
        store.open_new_task_form();
        assert!(store.editing_task().is_none());
        store.open_edit_form(id);
        assert_eq!(store.editing_task().map(|t| t.id), Some(id));
    }

    #[test]
    fn test_edit_then_cancel_leaves_tasks_unchanged() {
        let mut store = seeded();
        store.add_task(fields("Second")).unwrap();
        let before = store.tasks().to_vec();
        let id = store.tasks()[1].id;
        store.open_edit_form(id);
        store.cancel_form();
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.mode(), Mode::List);
    }

    #[test]
    fn test_write_tests_scenario() {
        let mut store = seeded();
        store.open_new_task_form();
        store
            .add_task(TaskFields {
                title: "Write tests".into(),
                description: String::new(),
                due_date: NaiveDate::from_ymd_opt(2024, 9, 1),
                priority: "Low".parse().unwrap(),
            })
            .unwrap();
        assert_eq!(store.mode(), Mode::List);
        let first = &store.tasks()[0];
        assert_eq!(first.title, "Write tests");
        assert_eq!(first.description, "");
        assert_eq!(first.due_date.unwrap().to_string(), "2024-09-01");
        assert_eq!(first.priority, Priority::Low);
        assert!(!first.completed);
        assert_eq!(store.tasks()[1].title, "Design the new homepage");
    }

    #[test]
    fn test_dispatch_outcomes() {
        let mut store = Store::new();
        let Outcome::Added(id) = store.dispatch(Action::AddTask(fields("A"))).unwrap() else {
            panic!("expected Added");
        };
        assert_eq!(
            store.dispatch(Action::ToggleComplete(id)).unwrap(),
            Outcome::Toggled {
                id,
                completed: true
            }
        );
        assert_eq!(
            store.dispatch(Action::OpenEditForm(id)).unwrap(),
            Outcome::ModeChanged(Mode::Form { editing: Some(id) })
        );
        assert_eq!(
            store.dispatch(Action::UpdateTask(id, fields("B"))).unwrap(),
            Outcome::Updated(id)
        );
        assert_eq!(
            store.dispatch(Action::DeleteTask(id)).unwrap(),
            Outcome::Deleted(id)
        );
        assert_eq!(
            store.dispatch(Action::DeleteTask(id)).unwrap(),
            Outcome::Unchanged
        );
        assert_eq!(
            store.dispatch(Action::AddTask(fields(""))),
            Err(TaskError::EmptyTitle)
        );
        assert_eq!(
            store.dispatch(Action::CancelForm).unwrap(),
            Outcome::ModeChanged(Mode::List)
        );
    }

    #[test]
    fn test_partition_covers_every_task_once() {
        let mut store = Store::new();
        for i in 0..6 {
            store.add_task(fields(&format!("T{}", i))).unwrap();
        }
        let ids: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        store.toggle_complete(ids[1]);
        store.toggle_complete(ids[4]);

        let groups = partition(store.tasks());
        assert_eq!(groups.incomplete.len() + groups.completed.len(), 6);
        assert!(groups.incomplete.iter().all(|t| !t.completed));
        assert!(groups.completed.iter().all(|t| t.completed));
        let mut seen: Vec<TaskId> = groups.display_order();
        seen.sort();
        let mut all = ids.clone();
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_partition_preserves_order() {
        let mut store = Store::new();
        for title in ["c", "b", "a"] {
            store.add_task(fields(title)).unwrap();
        }
        // Store order is a, b, c (newest first)
        let b = store.tasks()[1].id;
        store.toggle_complete(b);
        let groups = partition(store.tasks());
        let todo: Vec<&str> = groups.incomplete.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(todo, vec!["a", "c"]);
        assert_eq!(groups.completed[0].title, "b");
    }
}
