//! Whole-collection persistence over a `KeyValueStore`.
//!
//! # Responsibility
//! - Load the note collection from one fixed storage key at startup.
//! - Overwrite that key with the full serialized collection after mutations.
//!
//! # Invariants
//! - Stored format is a JSON array of `{id, title, content, createdAt}`.
//! - `load` never fails; storage and parse errors fall back to an empty list.
//! - Loaded collections never contain duplicate ids (first occurrence wins).

use crate::model::note::Note;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized collection.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

pub type PersistResult<T> = Result<T, PersistError>;

/// Write-path failure while persisting the collection.
#[derive(Debug)]
pub enum PersistError {
    /// Collection could not be encoded.
    Serialize(serde_json::Error),
    /// Backend refused or failed the write.
    Storage(StorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
            Self::Storage(err) => write!(f, "failed to write notes: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Reads and writes the note collection under one storage key.
pub struct CollectionRepository<S: KeyValueStore> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CollectionRepository<S> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Loads the stored collection.
    ///
    /// Returns an empty collection when the key is absent, the backend read
    /// fails, or the payload does not parse.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.storage.get(self.key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=notes_load module=repo status=ok source=empty count=0");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=notes_load module=repo status=error error_code=storage_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        let parsed = match serde_json::from_str::<Vec<Note>>(raw.as_str()) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=fallback error_code=parse_failed bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                return Vec::new();
            }
        };

        let notes = dedupe_ids(parsed);
        info!(
            "event=notes_load module=repo status=ok source=storage count={}",
            notes.len()
        );
        notes
    }

    /// Overwrites the stored collection with `notes`.
    pub fn save(&mut self, notes: &[Note]) -> PersistResult<()> {
        let payload = serde_json::to_string(notes)?;
        if let Err(err) = self.storage.set(self.key.as_str(), payload.as_str()) {
            error!(
                "event=notes_save module=repo status=error error_code=storage_write_failed count={} error={}",
                notes.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=notes_save module=repo status=ok count={} bytes={}",
            notes.len(),
            payload.len()
        );
        Ok(())
    }
}

fn dedupe_ids(notes: Vec<Note>) -> Vec<Note> {
    let total = notes.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Note> = notes
        .into_iter()
        .filter(|note| seen.insert(note.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "event=notes_load module=repo status=repaired dropped_duplicates={}",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{CollectionRepository, DEFAULT_STORAGE_KEY};
    use crate::model::note::{Note, NoteId};
    use crate::storage::MemoryKvStore;

    #[test]
    fn load_keeps_first_of_duplicate_ids() {
        let raw = r#"[
            {"id":"a","title":"first","content":"","createdAt":2},
            {"id":"a","title":"second","content":"","createdAt":1}
        ]"#;
        let repo = CollectionRepository::new(MemoryKvStore::new().with_entry(DEFAULT_STORAGE_KEY, raw));

        let notes = repo.load();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "first");
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let mut repo = CollectionRepository::with_key(MemoryKvStore::new(), "scratch");
        let note = Note::with_id(NoteId::from("n1"), 10);
        repo.save(std::slice::from_ref(&note)).unwrap();

        assert_eq!(repo.key(), "scratch");
        assert_eq!(repo.load(), vec![note]);
        let default_repo = CollectionRepository::new(repo.into_storage());
        assert!(default_repo.load().is_empty());
    }
}
