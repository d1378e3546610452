//! In-memory task store.
//!
//! The store is the authoritative, insertion-ordered collection of tasks for
//! one session. It never validates input and never reports a missing id as
//! an error: toggling or deleting an unknown id leaves the collection as is.

use crate::config::IdStrategy;
use crate::task::{IdGenerator, Task, TaskId};

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskStore {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            tasks: Vec::new(),
            ids: IdGenerator::new(strategy),
        }
    }

    /// Append a new, not yet completed task.
    pub fn add(&mut self, title: impl Into<String>, due_date: impl Into<String>) -> &Task {
        let id = self.fresh_id();
        let task = Task {
            id,
            title: title.into(),
            due_date: due_date.into(),
            completed: false,
        };
        tracing::debug!(task_id = %task.id, title = %task.title, "task added");
        let index = self.tasks.len();
        self.tasks.push(task);
        &self.tasks[index]
    }

    /// Flip the completion flag of `id`. Returns whether a task matched.
    pub fn toggle_completion(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                tracing::debug!(task_id = %id, completed = task.completed, "task toggled");
                true
            }
            None => {
                tracing::debug!(task_id = %id, "toggle ignored, no such task");
                false
            }
        }
    }

    /// Remove `id` from the collection. Returns whether a task matched.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::debug!(task_id = %id, "task deleted");
        } else {
            tracing::debug!(task_id = %id, "delete ignored, no such task");
        }
        removed
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn fresh_id(&mut self) -> TaskId {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = TaskStore::default();
        let first = store.add("a", "2025-01-01").id.clone();
        assert!(store.delete(&first));
        let second = store.add("b", "2025-01-02").id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn fresh_id_skips_live_collisions() {
        let mut store = TaskStore::default();
        store.tasks.push(Task {
            id: TaskId::new("1"),
            title: "seeded".to_string(),
            due_date: "2025-01-01".to_string(),
            completed: false,
        });
        let added = store.add("next", "2025-01-02").id.clone();
        assert_eq!(added, TaskId::new("2"));
    }
}
