use std::io::{BufRead, Write};

use super::{delete_record, export_records, import_records, Console, Menu};
use crate::entity::{Task, TaskUpdate};
use crate::error::Result;
use crate::storage::RecordStore;

pub struct TasksController {
    store: RecordStore<Task>,
}

impl TasksController {
    pub fn new(store: RecordStore<Task>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<Task> {
        &self.store
    }

    /// Add a task. Blank priority becomes the default, blank due date none.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        priority: &str,
        due_date: &str,
    ) -> Result<&Task> {
        self.store.add(|id| {
            Task::new(id, title.to_string(), description.to_string())
                .with_priority(priority)
                .with_due_date(due_date)
        })
    }

    /// Mark a task done. Marking an already done task is not an error.
    pub fn mark_done(&mut self, id: u32) -> Result<()> {
        self.store.get_mut(id)?.done = true;
        Ok(())
    }

    pub fn edit(&mut self, id: u32, update: TaskUpdate) -> Result<&Task> {
        let task = self.store.get_mut(id)?;
        task.apply(update);
        Ok(task)
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_empty() {
            return console.say("No tasks found.");
        }
        for task in self.store.records() {
            console.say(format!(
                "{}. {} ({}, {}, {})",
                task.id,
                task.title,
                task.priority,
                task.due_date.as_deref().unwrap_or("no due date"),
                task.status_label()
            ))?;
        }
        Ok(())
    }
}

impl Menu for TasksController {
    const TITLE: &'static str = "Tasks";
    const ITEMS: &'static [&'static str] = &[
        "Add a task",
        "List tasks",
        "Mark a task as done",
        "Edit a task",
        "Delete a task",
        "Import tasks from CSV",
        "Export tasks to CSV",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => {
                let title = console.prompt("Enter task title: ")?;
                let description = console.prompt("Enter task description: ")?;
                let priority = console.prompt("Enter priority (High, Medium, Low): ")?;
                let due_date = console.prompt("Enter due date (DD-MM-YYYY): ")?;
                let id = self.add(&title, &description, &priority, &due_date)?.id;
                console.say(format!("Task {} added.", id))
            }
            2 => self.list(console),
            3 => {
                let id = console.prompt_id("Enter task ID: ")?;
                self.mark_done(id)?;
                console.say("Task marked as done.")
            }
            4 => {
                let id = console.prompt_id("Enter task ID: ")?;
                let current = self.store.get(id)?.clone();
                let update = TaskUpdate {
                    title: console.prompt_update("Enter new title", &current.title)?,
                    description: console
                        .prompt_update("Enter new description", &current.description)?,
                    priority: console.prompt_update("Enter new priority", &current.priority)?,
                    due_date: console.prompt_update(
                        "Enter new due date",
                        current.due_date.as_deref().unwrap_or(""),
                    )?,
                };
                self.edit(id, update)?;
                console.say("Task updated.")
            }
            5 => delete_record(&mut self.store, console),
            6 => import_records(&mut self.store, console),
            7 => export_records(&self.store, console),
            _ => unreachable!("menu choice out of range: {}", choice),
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdPolicy;
    use crate::controller::run_menu;
    use crate::controller::testing::{output, scripted};
    use crate::error::AssistantError;
    use tempfile::TempDir;

    fn controller(tmp: &TempDir) -> TasksController {
        TasksController::new(
            RecordStore::open(tmp.path().join("tasks.json"), IdPolicy::NextFree).unwrap(),
        )
    }

    #[test]
    fn test_add_then_mark_done_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let mut tasks = controller(&tmp);

        let task = tasks.add("Buy milk", "desc", "High", "01-01-2025").unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.priority, "High");
        assert!(!task.done);

        tasks.mark_done(1).unwrap();
        assert!(tasks.store().find_by_id(1).unwrap().done);

        // Idempotent.
        tasks.mark_done(1).unwrap();
        assert!(tasks.store().find_by_id(1).unwrap().done);
    }

    #[test]
    fn test_mark_done_missing() {
        let tmp = TempDir::new().unwrap();
        let mut tasks = controller(&tmp);
        assert!(matches!(
            tasks.mark_done(3),
            Err(AssistantError::RecordNotFound { kind: "Task", id: 3 })
        ));
    }

    #[test]
    fn test_blank_edit_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut tasks = controller(&tmp);
        let before = tasks.add("t", "d", "Low", "02-02-2025").unwrap().clone();

        let after = tasks.edit(1, TaskUpdate::default()).unwrap();
        assert_eq!(after, &before);
    }

    #[test]
    fn test_menu_session() {
        let tmp = TempDir::new().unwrap();
        let mut tasks = controller(&tmp);
        let mut console = scripted(&[
            "1", "Buy milk", "2 litres", "", "", // add with defaults
            "3", "1", // mark done
            "2", // list
            "4", "1", "", "", "Low", "", // edit priority only
            "1", "Walk dog", "", "", "", // second task
            "5", "2", // delete it
            "8",
        ]);

        run_menu(&mut tasks, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Task 1 added."));
        assert!(out.contains("1. Buy milk (Medium, no due date, done)"));
        assert!(out.contains("Task deleted."));

        let reopened = controller(&tmp);
        assert_eq!(reopened.store().len(), 1);
        let task = reopened.store().find_by_id(1).unwrap();
        assert!(task.done);
        assert_eq!(task.priority, "Low");
        assert_eq!(task.description, "2 litres");
        assert_eq!(task.due_date, None);
    }
}
