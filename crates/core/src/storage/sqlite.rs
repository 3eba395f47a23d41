use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OptionalExtension};

use super::KeyValueStore;
use crate::config::AppConfig;
use crate::error::StorageError;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let store = Self { conn };
        store.apply_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let store = Self { conn };
        store.apply_migrations()?;
        Ok(store)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
                 );",
            )
            .context("Failed to apply key-value schema")?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = :key",
                named_params![":key": key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')",
            named_params![":key": key, ":value": value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = :key", named_params![":key": key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    #[test]
    fn values_survive_reopen() {
        let (config, _dir) = temp_config();
        {
            let mut store = SqliteStore::initialize(&config).unwrap();
            store.set("tasks", "[]").unwrap();
            store.set("tasks", "[1]").unwrap();
        }

        let store = SqliteStore::initialize(&config).unwrap();
        assert_eq!(store.get("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_clears_key() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.set("tasks", "[]").unwrap();
        store.remove("tasks").unwrap();
        assert!(store.get("tasks").unwrap().is_none());
        store.remove("tasks").unwrap();
    }
}
