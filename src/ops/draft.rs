use chrono::{Days, Months, NaiveDate};
use tracing::debug;

use crate::model::task::{Priority, Task, TaskFields, TaskId};
use crate::ops::task_ops::{Mode, Store, TaskError};

/// The form's unsaved copy of a task's editable fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Draft {
    /// Blank draft for a new task (priority Medium, no due date)
    pub fn new() -> Self {
        Draft::default()
    }

    /// Draft seeded from an existing task
    pub fn from_task(task: &Task) -> Self {
        let fields = task.fields();
        Draft {
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            priority: fields.priority,
        }
    }

    /// Draft for whatever the store's form mode points at
    pub fn for_store(store: &Store) -> Self {
        store.editing_task().map_or_else(Draft::new, Draft::from_task)
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }

    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Commit the draft: update the edited task, or add a new one.
    /// On error nothing in the store changes and the form stays open.
    pub fn submit(&self, store: &mut Store) -> Result<TaskId, TaskError> {
        if !self.can_save() {
            return Err(TaskError::EmptyTitle);
        }
        match store.mode() {
            Mode::Form { editing: Some(id) } => {
                store.update_task(id, self.fields())?;
                Ok(id)
            }
            _ => store.add_task(self.fields()),
        }
    }

    // -----------------------------------------------------------------------
    // Priority (exclusive choice)
    // -----------------------------------------------------------------------

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    // -----------------------------------------------------------------------
    // Due date picker
    // -----------------------------------------------------------------------

    /// Move the due date by `delta` days. An empty date starts from `today`.
    pub fn shift_due_days(&mut self, delta: i64, today: NaiveDate) {
        let base = self.due_date.unwrap_or(today);
        let days = Days::new(delta.unsigned_abs());
        let next = if delta >= 0 {
            base.checked_add_days(days)
        } else {
            base.checked_sub_days(days)
        };
        if let Some(date) = next {
            self.set_due(Some(date));
        }
    }

    /// Move the due date by `delta` months, clamping to the end of shorter months
    pub fn shift_due_months(&mut self, delta: i32, today: NaiveDate) {
        let base = self.due_date.unwrap_or(today);
        let months = Months::new(delta.unsigned_abs());
        let next = if delta >= 0 {
            base.checked_add_months(months)
        } else {
            base.checked_sub_months(months)
        };
        if let Some(date) = next {
            self.set_due(Some(date));
        }
    }

    pub fn set_due_today(&mut self, today: NaiveDate) {
        self.set_due(Some(today));
    }

    pub fn clear_due(&mut self) {
        self.set_due(None);
    }

    fn set_due(&mut self, date: Option<NaiveDate>) {
        debug!(?date, "draft due date");
        self.due_date = date;
    }
}
