use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque task identifier, unique within a store for the task's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority, ordered Low < Medium < High
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in display order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Next priority to the right, saturating at High
    pub fn raise(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium | Priority::High => Priority::High,
        }
    }

    /// Next priority to the left, saturating at Low
    pub fn lower(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium | Priority::Low => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority '{}' (expected low, medium or high)",
                other
            )),
        }
    }
}

/// The editable fields of a task, as supplied by the form or the seed config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
}

impl TaskFields {
    pub fn new(title: impl Into<String>) -> Self {
        TaskFields {
            title: title.into(),
            ..Default::default()
        }
    }

    /// A title is usable once it has a non-whitespace character
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Calendar date without time of day, serialized as `YYYY-MM-DD`
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task from its editable fields
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Task {
            id,
            title: fields.title,
            description: fields.description,
            due_date: fields.due_date,
            priority: fields.priority,
            completed: false,
        }
    }

    /// Replace every editable field, keeping id and completion state
    pub fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.due_date = fields.due_date;
        self.priority = fields.priority;
    }

    /// Copy out the editable fields (seeds the edit form)
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }
}
