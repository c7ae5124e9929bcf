// src/entity/task.rs
use serde::{Deserialize, Serialize};

use super::{apply, CsvRow, Record};
use crate::error::Result;

/// Priority given to tasks created without one.
pub const DEFAULT_PRIORITY: &str = "Medium";

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    pub fn new(id: u32, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            done: false,
            priority: default_priority(),
            due_date: None,
        }
    }

    /// Set priority, falling back to the default for blank input.
    pub fn with_priority(mut self, priority: &str) -> Self {
        if !priority.trim().is_empty() {
            self.priority = priority.to_string();
        }
        self
    }

    pub fn with_due_date(mut self, due_date: &str) -> Self {
        self.due_date = (!due_date.trim().is_empty()).then(|| due_date.to_string());
        self
    }

    pub fn apply(&mut self, update: TaskUpdate) {
        apply(&mut self.title, update.title);
        apply(&mut self.description, update.description);
        apply(&mut self.priority, update.priority);
        if update.due_date.is_some() {
            self.due_date = update.due_date;
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.done {
            "done"
        } else {
            "not done"
        }
    }
}

/// Update payload for a task
#[derive(Debug, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// CSV booleans: `True` is what older exports wrote.
fn parse_done(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

impl Record for Task {
    const KIND: &'static str = "Task";
    const CSV_HEADER: &'static [&'static str] =
        &["id", "title", "description", "done", "priority", "due_date"];

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.description.clone(),
            if self.done { "True" } else { "False" }.to_string(),
            self.priority.clone(),
            self.due_date.clone().unwrap_or_default(),
        ]
    }

    fn from_csv_row(row: &CsvRow<'_>, id: u32) -> Result<Self> {
        let mut task = Task::new(
            id,
            row.get("title")?.to_string(),
            row.get("description")?.to_string(),
        )
        .with_priority(row.get("priority")?)
        .with_due_date(row.optional("due_date").unwrap_or_default());
        task.done = parse_done(row.get("done")?);
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new(1, "Buy milk".to_string(), "desc".to_string());
        assert!(!task.done);
        assert_eq!(task.priority, "Medium");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_blank_priority_uses_default() {
        let task = Task::new(1, "t".to_string(), "d".to_string())
            .with_priority("  ")
            .with_due_date("");
        assert_eq!(task.priority, DEFAULT_PRIORITY);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_update_is_per_field() {
        let mut task = Task::new(1, "t".to_string(), "d".to_string())
            .with_priority("High")
            .with_due_date("01-01-2025");

        task.apply(TaskUpdate {
            description: Some("new desc".to_string()),
            ..Default::default()
        });

        assert_eq!(task.title, "t");
        assert_eq!(task.description, "new desc");
        assert_eq!(task.priority, "High");
        assert_eq!(task.due_date.as_deref(), Some("01-01-2025"));
    }

    #[test]
    fn test_parse_done_variants() {
        assert!(parse_done("True"));
        assert!(parse_done("true"));
        assert!(parse_done("1"));
        assert!(!parse_done("False"));
        assert!(!parse_done(""));
    }

    #[test]
    fn test_from_csv_row() {
        let headers =
            StringRecord::from(vec!["id", "title", "description", "done", "priority", "due_date"]);
        let record = StringRecord::from(vec!["8", "Call", "dentist", "True", "", "05-05-2025"]);

        let task = Task::from_csv_row(&CsvRow::new(&headers, &record), 2).unwrap();

        assert_eq!(task.id, 2);
        assert!(task.done);
        assert_eq!(task.priority, "Medium");
        assert_eq!(task.due_date.as_deref(), Some("05-05-2025"));
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id": 1, "title": "t", "description": "d"}"#).unwrap();
        assert!(!task.done);
        assert_eq!(task.priority, "Medium");
    }
}
