//! In-process key-value store.
//!
//! Nothing survives the process. Used for tests and for sessions that should
//! not touch disk.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
    reject_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw entry, bypassing write rejection.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Makes every following `set`/`remove` fail with `WriteRejected`.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    fn ensure_writable(&self) -> StorageResult<()> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected(
                "memory store is read-only".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.ensure_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn rejected_writes_leave_entries_untouched() {
        let mut store = MemoryKvStore::new().with_entry("notes", "[]");
        store.set_reject_writes(true);

        let err = store.set("notes", "[1]").unwrap_err();
        assert!(matches!(err, StorageError::WriteRejected(_)));
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_drops_entry_and_respects_rejection() {
        let mut store = MemoryKvStore::new()
            .with_entry("notes", "[]")
            .with_entry("draft", "x");
        store.remove("draft").unwrap();
        store.remove("draft").unwrap();
        assert_eq!(store.get("draft").unwrap(), None);

        store.set_reject_writes(true);
        let err = store.remove("notes").unwrap_err();
        assert!(matches!(err, StorageError::WriteRejected(_)));
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[]"));
    }
}
