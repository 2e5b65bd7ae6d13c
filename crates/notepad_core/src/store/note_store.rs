//! Note store: owner of the ordered note collection.
//!
//! # Responsibility
//! - Create, update, and delete notes in the canonical collection.
//! - Persist the full collection after every effective mutation.
//!
//! # Invariants
//! - Collection order is newest-first; creation prepends.
//! - Ids are unique within the collection.
//! - Update and delete of an unknown id are silent no-ops and skip the save.
//! - Mutations are staged on a copy and committed to memory only after the
//!   save succeeds; a failed write leaves the collection unchanged.

use crate::model::note::{Note, NoteId};
use crate::repo::collection_repo::{CollectionRepository, PersistError};
use crate::storage::KeyValueStore;
use log::info;

pub type StoreResult<T> = Result<T, PersistError>;

/// Sole owner and mutator of the note collection.
pub struct NoteStore<S: KeyValueStore> {
    notes: Vec<Note>,
    repo: CollectionRepository<S>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Builds the store from whatever the repository currently holds.
    pub fn open(repo: CollectionRepository<S>) -> Self {
        let notes = repo.load();
        Self { notes, repo }
    }

    /// Read-only view, newest first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &CollectionRepository<S> {
        &self.repo
    }

    pub fn into_repository(self) -> CollectionRepository<S> {
        self.repo
    }

    /// Creates a default note, prepends it, persists, and returns a copy.
    pub fn create_note(&mut self) -> StoreResult<Note> {
        let mut note = Note::new();
        while self.get(&note.id).is_some() {
            note.id = NoteId::generate();
        }

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note.clone());
        next.extend(self.notes.iter().cloned());
        self.commit(next)?;
        info!(
            "event=note_create module=store status=ok note_id={} count={}",
            note.id,
            self.notes.len()
        );
        Ok(note)
    }

    /// Removes the note with `id`.
    ///
    /// Returns `true` when a note was removed, `false` when `id` was unknown.
    pub fn delete_note(&mut self, id: &NoteId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            info!("event=note_delete module=store status=noop note_id={id}");
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next)?;
        info!(
            "event=note_delete module=store status=ok note_id={} count={}",
            id,
            self.notes.len()
        );
        Ok(true)
    }

    /// Replaces title and content of the note with `id`.
    ///
    /// Returns the updated note, or `None` when `id` was unknown. `id` and
    /// `created_at` are preserved.
    pub fn update_note(
        &mut self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StoreResult<Option<Note>> {
        let Some(index) = self.position(id) else {
            info!("event=note_update module=store status=noop note_id={id}");
            return Ok(None);
        };

        let mut next = self.notes.clone();
        let note = &mut next[index];
        note.title = title.into();
        note.content = content.into();
        let updated = note.clone();
        self.commit(next)?;
        info!(
            "event=note_update module=store status=ok note_id={} title_chars={} content_chars={}",
            updated.id,
            updated.title.chars().count(),
            updated.content.chars().count()
        );
        Ok(Some(updated))
    }

    fn commit(&mut self, next: Vec<Note>) -> StoreResult<()> {
        self.repo.save(&next)?;
        self.notes = next;
        Ok(())
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }
}
