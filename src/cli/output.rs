use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Priority, Task, TaskId};
use crate::ops::task_ops::Partition;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq)]
pub struct TaskJson {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub completed: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TaskListJson {
    pub todo: Vec<TaskJson>,
    pub completed: Vec<TaskJson>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        due_date: task.due_date,
        priority: task.priority,
        completed: task.completed,
    }
}

pub fn list_to_json(groups: &Partition<'_>) -> TaskListJson {
    TaskListJson {
        todo: groups.incomplete.iter().map(|t| task_to_json(t)).collect(),
        completed: groups.completed.iter().map(|t| task_to_json(t)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `[ ] #1 Title (High, due 2024-09-01)`
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let due = task
        .due_date
        .map(|d| format!(", due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "[{}] #{} {} ({}{})",
        check, task.id, task.title, task.priority, due
    )
}

/// Both groups, each under its heading. Descriptions follow their task,
/// indented.
pub fn format_listing(groups: &Partition<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for (heading, tasks) in [("To-do", &groups.incomplete), ("Completed", &groups.completed)] {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(heading.to_string());
        if tasks.is_empty() {
            lines.push("  (none)".to_string());
        }
        for task in tasks.iter() {
            lines.push(format!("  {}", format_task_line(task)));
            for desc in task.description.lines().filter(|l| !l.trim().is_empty()) {
                lines.push(format!("      {}", desc));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskFields;
    use crate::ops::task_ops::{Store, partition};
    use pretty_assertions::assert_eq;

    fn store() -> Store {
        let mut store = Store::new();
        let mut fields = TaskFields::new("Write tests");
        fields.description = "Cover the store".into();
        fields.due_date = NaiveDate::from_ymd_opt(2024, 9, 1);
        fields.priority = Priority::Low;
        let id = store.add_task(fields).unwrap();
        store.add_task(TaskFields::new("Ship")).unwrap();
        store.toggle_complete(id);
        store
    }

    #[test]
    fn text_listing_groups() {
        let store = store();
        let lines = format_listing(&partition(store.tasks()));
        assert_eq!(
            lines,
            vec![
                "To-do",
                "  [ ] #2 Ship (Medium)",
                "",
                "Completed",
                "  [x] #1 Write tests (Low, due 2024-09-01)",
                "      Cover the store",
            ]
        );
    }

    #[test]
    fn empty_groups_say_none() {
        let store = Store::new();
        let lines = format_listing(&partition(store.tasks()));
        assert_eq!(lines, vec!["To-do", "  (none)", "", "Completed", "  (none)"]);
    }

    #[test]
    fn json_shape() {
        let store = store();
        let json = serde_json::to_value(list_to_json(&partition(store.tasks()))).unwrap();
        assert_eq!(json["todo"][0]["title"], "Ship");
        assert_eq!(json["todo"][0]["due_date"], serde_json::Value::Null);
        assert_eq!(json["todo"][0]["priority"], "medium");
        assert_eq!(json["completed"][0]["id"], 1);
        assert_eq!(json["completed"][0]["due_date"], "2024-09-01");
        assert_eq!(json["completed"][0]["completed"], true);
    }
}
