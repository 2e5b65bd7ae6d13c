//! Editor session state machine.
//!
//! # Responsibility
//! - Track which note the editor pane shows.
//! - Hold the edit buffer, separate from the committed note.
//! - Commit the buffer through `NoteStore::update_note` on save.
//!
//! # Invariants
//! - `Idle` carries no buffer; `Editing` always carries one.
//! - Selecting a note copies its title/content into a fresh buffer.
//! - Buffer edits never touch the store; only `save` does.
//! - `has_changes` is derived on every call, never cached.

use crate::model::note::{Note, NoteId};
use crate::storage::KeyValueStore;
use crate::store::note_store::{NoteStore, StoreResult};
use log::{debug, warn};

/// Working copy of the fields a user can edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditBuffer {
    pub title: String,
    pub content: String,
}

impl EditBuffer {
    fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    fn differs_from(&self, note: &Note) -> bool {
        self.title != note.title || self.content != note.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum SessionState {
    #[default]
    Idle,
    Editing {
        /// Snapshot of the committed note at selection or last save.
        note: Note,
        buffer: EditBuffer,
    },
}

/// Selection plus edit buffer for the editor pane.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    state: SessionState,
}

impl EditorSession {
    /// Starts idle.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing { .. })
    }

    /// Committed snapshot of the selected note.
    pub fn selected_note(&self) -> Option<&Note> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Editing { note, .. } => Some(note),
        }
    }

    pub fn selected_id(&self) -> Option<&NoteId> {
        self.selected_note().map(|note| &note.id)
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Editing { buffer, .. } => Some(buffer),
        }
    }

    /// Whether the buffer differs from the committed note.
    ///
    /// Always `false` while idle.
    pub fn has_changes(&self) -> bool {
        match &self.state {
            SessionState::Idle => false,
            SessionState::Editing { note, buffer } => buffer.differs_from(note),
        }
    }

    /// Selects `note`, replacing any previous selection and discarding its
    /// uncommitted edits.
    pub fn select(&mut self, note: &Note) {
        if self.has_changes() {
            debug!(
                "event=session_select module=session status=discarded_edits previous_note_id={}",
                self.selected_id().map(NoteId::as_str).unwrap_or_default()
            );
        }
        self.state = SessionState::Editing {
            note: note.clone(),
            buffer: EditBuffer::from_note(note),
        };
        debug!("event=session_select module=session status=ok note_id={}", note.id);
    }

    /// Replaces the buffered title. Returns `false` while idle.
    pub fn edit_title(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            SessionState::Idle => false,
            SessionState::Editing { buffer, .. } => {
                buffer.title = text.into();
                true
            }
        }
    }

    /// Replaces the buffered content. Returns `false` while idle.
    pub fn edit_content(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            SessionState::Idle => false,
            SessionState::Editing { buffer, .. } => {
                buffer.content = text.into();
                true
            }
        }
    }

    /// Commits the buffer into `store`.
    ///
    /// Returns `Ok(false)` without touching the store when there is nothing
    /// to save. If the selected note vanished from the store, the session
    /// falls back to idle and returns `Ok(false)`.
    ///
    /// # Errors
    /// - Propagates the store's write failure; the session then keeps its
    ///   buffer and snapshot so the save can be retried.
    pub fn save<S: KeyValueStore>(&mut self, store: &mut NoteStore<S>) -> StoreResult<bool> {
        let SessionState::Editing { note, buffer } = &self.state else {
            return Ok(false);
        };
        if !buffer.differs_from(note) {
            return Ok(false);
        }

        let id = note.id.clone();
        match store.update_note(&id, buffer.title.clone(), buffer.content.clone())? {
            Some(updated) => {
                self.state = SessionState::Editing {
                    buffer: EditBuffer::from_note(&updated),
                    note: updated,
                };
                Ok(true)
            }
            None => {
                warn!("event=session_save module=session status=missing_note note_id={id}");
                self.state = SessionState::Idle;
                Ok(false)
            }
        }
    }

    /// Resets the buffer to the committed note.
    ///
    /// Returns `false` when there was nothing to discard.
    pub fn cancel(&mut self) -> bool {
        match &mut self.state {
            SessionState::Editing { note, buffer } if buffer.differs_from(note) => {
                *buffer = EditBuffer::from_note(note);
                true
            }
            _ => false,
        }
    }

    /// Drops selection and buffer without committing.
    pub fn deselect(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Reacts to deletion of `id` from the store.
    ///
    /// Returns `true` when the deleted note was selected and the session went
    /// idle.
    pub fn note_deleted(&mut self, id: &NoteId) -> bool {
        if self.selected_id() == Some(id) {
            self.state = SessionState::Idle;
            return true;
        }
        false
    }
}
