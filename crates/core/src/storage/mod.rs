//! The key-value surface the task collection is persisted through.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use tracing::warn;

use crate::config::AppConfig;
use crate::error::StorageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// A backend picked at runtime.
pub type DynStore = Box<dyn KeyValueStore>;

/// The store a session ends up with.
pub struct OpenedStore {
    pub store: DynStore,
    /// Set when the SQLite file could not be opened and tasks only live in memory.
    pub fallback: Option<anyhow::Error>,
}

impl OpenedStore {
    pub fn is_durable(&self) -> bool {
        self.fallback.is_none()
    }
}

/// Open the SQLite store for `config`. When that fails the session keeps
/// working against an empty [`MemoryStore`] and nothing is saved.
pub fn open_or_memory(config: &AppConfig) -> OpenedStore {
    match SqliteStore::initialize(config) {
        Ok(store) => OpenedStore {
            store: Box::new(store),
            fallback: None,
        },
        Err(err) => {
            warn!(
                db = %config.db_path().display(),
                error = %format!("{err:#}"),
                "storage unavailable; tasks will not be saved this session"
            );
            OpenedStore {
                store: Box::new(MemoryStore::new()),
                fallback: Some(err),
            }
        }
    }
}
