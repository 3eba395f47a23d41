use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::model::Task;
use crate::storage::KeyValueStore;

/// Key the whole collection is stored under.
pub const STORAGE_KEY: &str = "tasks";

/// Reads and writes the task collection as a single JSON array.
///
/// Every failure is absorbed here: a bad read yields an empty collection and a
/// bad write is logged and dropped, so callers never see storage errors.
#[derive(Debug)]
pub struct TaskPersistence<S> {
    backend: S,
}

impl<S: KeyValueStore> TaskPersistence<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn load(&self) -> Vec<Task> {
        let raw = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read stored tasks; starting empty");
                return Vec::new();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                warn!(kind = value_kind(&other), "stored tasks are not a list; starting empty");
                return Vec::new();
            }
            Err(err) => {
                warn!(error = %err, "stored tasks are not valid JSON; starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let task = match serde_json::from_value::<Task>(entry) {
                Ok(task) => task,
                Err(err) => {
                    warn!(position, error = %err, "skipping unreadable stored task");
                    continue;
                }
            };
            if task.text.trim().is_empty() {
                warn!(position, id = task.id.as_str(), "skipping stored task with blank text");
                continue;
            }
            if !seen.insert(task.id.clone()) {
                warn!(position, id = task.id.as_str(), "skipping stored task with duplicate id");
                continue;
            }
            tasks.push(task);
        }

        debug!(count = tasks.len(), "loaded tasks");
        tasks
    }

    pub fn save(&mut self, tasks: &[Task]) {
        if let Err(err) = self.try_save(tasks) {
            warn!(error = %err, count = tasks.len(), "failed to persist tasks; keeping in-memory state");
        }
    }

    pub fn reset(&mut self) {
        if let Err(err) = self.backend.remove(STORAGE_KEY) {
            warn!(error = %err, "failed to remove stored tasks");
        }
    }

    fn try_save(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(tasks)?;
        self.backend.set(STORAGE_KEY, &payload)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
