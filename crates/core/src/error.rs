use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite storage failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("writing {size} bytes under '{key}' exceeds the {quota} byte quota")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },
    #[error("reading '{key}' failed: storage is unreadable")]
    Unreadable { key: String },
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}
