//! Task registry.
//!
//! At most one task is active (the current focus target). The first task
//! added to an empty registry becomes active; after that, selection only
//! changes through [`TaskRegistry::select`]. Removing the active task leaves
//! no task active.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub is_completed: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate persisted tasks.
    ///
    /// If more than one task claims to be active, only the first keeps the
    /// flag.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        let mut seen_active = false;
        for task in &mut tasks {
            if task.is_active {
                if seen_active {
                    task.is_active = false;
                }
                seen_active = true;
            }
        }
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The currently selected task, if any.
    pub fn active(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_active)
    }

    /// Add a task. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyText`] when nothing is left after
    /// trimming; the registry is unchanged.
    pub fn add(&mut self, text: &str) -> Result<&Task, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let is_active = self.tasks.is_empty();
        self.tasks.push(Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_completed: false,
            is_active,
        });
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip completion. Returns the new value, or `None` for an unknown id.
    pub fn toggle_completion(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.is_completed = !task.is_completed;
        Some(task.is_completed)
    }

    /// Remove a task. Returns the removed task, or `None` for an unknown id.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Make `id` the only active task. An unknown id clears the selection.
    ///
    /// Returns whether a task was selected.
    pub fn select(&mut self, id: &str) -> bool {
        let mut found = false;
        for task in &mut self.tasks {
            task.is_active = task.id == id;
            found |= task.is_active;
        }
        found
    }
}
