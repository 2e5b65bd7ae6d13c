//! Core logic for notepad: a persisted note list with an editor session.
//! This crate owns the note collection and every rule about changing it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod storage;
pub mod store;

pub use config::{default_data_dir, AppConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, DEFAULT_NOTE_TITLE};
pub use repo::collection_repo::{
    CollectionRepository, PersistError, PersistResult, DEFAULT_STORAGE_KEY,
};
pub use service::notes_app::{
    derive_preview, note_count_label, NoteSummary, NotesApp, EMPTY_PREVIEW,
};
pub use session::editor_session::{EditBuffer, EditorSession};
pub use storage::{KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
pub use store::note_store::{NoteStore, StoreResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
