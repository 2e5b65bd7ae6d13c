//! Notes app facade for UI callers.
//!
//! # Responsibility
//! - Bundle the note store and editor session behind the operations a UI
//!   layer drives (list, create, delete, select, edit, save, cancel).
//! - Derive list projections (`NoteSummary`, count label).
//!
//! # Invariants
//! - Creating a note selects it with a fresh buffer.
//! - Deleting the selected note leaves the session idle.
//! - The session never mutates the collection except through `save`.

use crate::config::AppConfig;
use crate::model::note::{Note, NoteId};
use crate::repo::collection_repo::CollectionRepository;
use crate::session::editor_session::{EditBuffer, EditorSession};
use crate::storage::{KeyValueStore, SqliteKvStore, StorageResult};
use crate::store::note_store::{NoteStore, StoreResult};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;
/// Preview shown for notes without content.
pub const EMPTY_PREVIEW: &str = "No content";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One row of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    /// Single-line content excerpt, or `EMPTY_PREVIEW`.
    pub preview: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Whether the editor pane currently shows this note.
    pub selected: bool,
}

/// Note store plus editor session, driven by one UI.
pub struct NotesApp<S: KeyValueStore> {
    store: NoteStore<S>,
    session: EditorSession,
}

impl NotesApp<SqliteKvStore> {
    /// Opens the SQLite-backed workspace described by `config`.
    ///
    /// The data directory must already exist.
    pub fn open_sqlite(config: &AppConfig) -> StorageResult<Self> {
        let storage = SqliteKvStore::open(config.db_path())?;
        let app = Self::open(storage, config.storage_key.as_str());
        info!(
            "event=app_open module=service status=ok backend=sqlite count={}",
            app.list().len()
        );
        Ok(app)
    }
}

impl<S: KeyValueStore> NotesApp<S> {
    /// Loads the collection stored under `key` and starts idle.
    pub fn open(storage: S, key: &str) -> Self {
        Self::new(NoteStore::open(CollectionRepository::with_key(storage, key)))
    }

    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            session: EditorSession::new(),
        }
    }

    pub fn list(&self) -> &[Note] {
        self.store.list()
    }

    /// List rows, newest first.
    pub fn summaries(&self) -> Vec<NoteSummary> {
        let selected = self.session.selected_id();
        self.store
            .list()
            .iter()
            .map(|note| NoteSummary {
                id: note.id.clone(),
                title: note.title.clone(),
                preview: derive_preview(note.content.as_str()),
                created_at: note.created_at,
                selected: selected == Some(&note.id),
            })
            .collect()
    }

    pub fn count_label(&self) -> String {
        note_count_label(self.store.len())
    }

    /// Creates a note and opens it in the editor.
    pub fn create_note(&mut self) -> StoreResult<Note> {
        let note = self.store.create_note()?;
        self.session.select(&note);
        Ok(note)
    }

    /// Deletes `id`, clearing the selection when it pointed at that note.
    ///
    /// Returns whether a note was removed.
    pub fn delete_note(&mut self, id: &NoteId) -> StoreResult<bool> {
        let removed = self.store.delete_note(id)?;
        if removed {
            self.session.note_deleted(id);
        }
        Ok(removed)
    }

    /// Selects the stored note with `id`. Returns `false` for unknown ids.
    pub fn select(&mut self, id: &NoteId) -> bool {
        match self.store.get(id) {
            Some(note) => {
                self.session.select(note);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    pub fn edit_title(&mut self, text: impl Into<String>) -> bool {
        self.session.edit_title(text)
    }

    pub fn edit_content(&mut self, text: impl Into<String>) -> bool {
        self.session.edit_content(text)
    }

    /// Commits pending edits. Returns `Ok(false)` when there were none.
    pub fn save(&mut self) -> StoreResult<bool> {
        self.session.save(&mut self.store)
    }

    /// Discards pending edits. Returns `false` when there were none.
    pub fn cancel(&mut self) -> bool {
        self.session.cancel()
    }

    pub fn has_changes(&self) -> bool {
        self.session.has_changes()
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.session.selected_note()
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.session.buffer()
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn into_store(self) -> NoteStore<S> {
        self.store
    }
}

/// Collapses whitespace and keeps the first 100 characters of `content`.
pub fn derive_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }
    trimmed.chars().take(PREVIEW_MAX_CHARS).collect()
}

/// `"1 note"`, otherwise `"N notes"`.
pub fn note_count_label(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}
