use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// In-process store, handy for tests and throwaway sessions.
///
/// An optional byte quota simulates a full disk: a `set` whose value is
/// larger than the quota fails with [`StorageError::QuotaExceeded`] and leaves
/// the previous value in place. [`MemoryStore::unreadable`] makes every `get`
/// fail, the way a revoked or corrupted backing store would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    fail_reads: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Every subsequent `get` fails with [`StorageError::Unreadable`].
    pub fn unreadable(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Seed a raw value, bypassing the quota and the write counter.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set` calls attempted, successful or not.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unreadable {
                key: key.to_string(),
            });
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_rejects_oversized_values_and_keeps_previous() {
        let mut store = MemoryStore::with_quota(4);
        store.set("k", "abc").unwrap();

        let err = store.set("k", "abcdef").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 6, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn unreadable_store_fails_every_get() {
        let store = MemoryStore::new().with_entry("k", "v").unreadable();
        let err = store.get("k").unwrap_err();
        assert!(matches!(err, StorageError::Unreadable { ref key } if key == "k"));
    }

    #[test]
    fn remove_missing_key_is_fine() {
        let mut store = MemoryStore::new();
        store.remove("nothing").unwrap();
        assert!(store.get("nothing").unwrap().is_none());
    }
}
