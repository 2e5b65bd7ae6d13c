//! Synchronous key-value storage backends.
//!
//! # Responsibility
//! - Define the string key/value contract the persistence adapter writes to.
//! - Provide a durable SQLite backend and an in-process memory backend.
//!
//! # Invariants
//! - Every call completes before returning; there is no deferred write.
//! - `set` overwrites any previous value stored under the same key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory_kv;
pub mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Backing store exists but lacks the expected layout.
    MissingRequiredTable(&'static str),
    /// Backend refused the write (for example a full or read-only store).
    WriteRejected(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage is missing required table `{table}`")
            }
            Self::WriteRejected(reason) => write!(f, "storage write rejected: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Process-local string key/value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing prior content.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
