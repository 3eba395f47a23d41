pub mod config;
pub mod edit;
pub mod error;
pub mod format;
pub mod model;
pub mod persistence;
pub mod render;
pub mod services;
pub mod storage;
pub mod store;

pub use config::AppConfig;
pub use edit::{EditKey, EditMode};
pub use error::StorageError;
pub use model::*;
pub use persistence::{TaskPersistence, STORAGE_KEY};
pub use render::{render, EditRow, Listing, Row, TaskRow};
pub use services::{Board, Effect, Event, Outcome, Update};
pub use storage::{open_or_memory, DynStore, KeyValueStore, MemoryStore, OpenedStore, SqliteStore};
pub use store::TaskStore;
