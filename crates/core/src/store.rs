use tracing::debug;

use crate::format::sanitize_due_time;
use crate::model::{Task, TextChange};
use crate::persistence::TaskPersistence;
use crate::storage::KeyValueStore;

/// Owns the ordered task collection; newest first.
///
/// Every mutation applies in memory first and then writes the whole collection
/// through [`TaskPersistence`], which never fails from the caller's view.
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    persistence: TaskPersistence<S>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load whatever the backend holds; unreadable data starts an empty list.
    pub fn open(backend: S) -> Self {
        let persistence = TaskPersistence::new(backend);
        let tasks = persistence.load();
        Self { tasks, persistence }
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
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    pub fn add(&mut self, text: &str, due_time: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let due_time = Some(sanitize_due_time(due_time)).filter(|due| !due.is_empty());
        let task = Task::new(text, due_time);
        debug!(id = task.id.as_str(), "task added");
        self.tasks.insert(0, task);
        self.persist();
        self.tasks.first()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        debug!(id, removed, "task removal");
        self.persist();
        removed
    }

    /// Flip the completion flag; returns the new flag, or `None` if `id` is unknown.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let flipped = self.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.completed = !task.completed;
            task.completed
        });
        self.persist();
        flipped
    }

    /// Blank text removes the task instead of storing an empty one.
    pub fn set_text(&mut self, id: &str, new_text: &str) -> TextChange {
        let value = new_text.trim();
        if value.is_empty() {
            return if self.remove(id) {
                TextChange::Removed
            } else {
                TextChange::Missing
            };
        }

        let change = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.text = value.to_string();
                TextChange::Updated
            }
            None => TextChange::Missing,
        };
        self.persist();
        change
    }

    /// Drop every completed task. Nothing is written when none are completed.
    pub fn clear_completed(&mut self) -> usize {
        if !self.tasks.iter().any(|task| task.completed) {
            return 0;
        }
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let cleared = before - self.tasks.len();
        debug!(cleared, "completed tasks cleared");
        self.persist();
        cleared
    }

    /// Forget everything, in memory and in storage.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.persistence.reset();
    }

    fn persist(&mut self) {
        self.persistence.save(&self.tasks);
    }
}
