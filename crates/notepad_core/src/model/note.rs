//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the note store.
//! - Generate fresh identifiers and creation timestamps.
//!
//! # Invariants
//! - `id` is unique within one collection and never reused.
//! - `id` and `created_at` are immutable; only `title`/`content` change.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Title assigned to every freshly created note.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

/// Opaque, stable note identifier.
///
/// Freshly created notes get a random UUIDv4 string. Stored ids are accepted
/// verbatim, so collections written with other id schemes still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identity assigned at creation.
    pub id: NoteId,
    /// Display title.
    pub title: String,
    /// Plain text body.
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a note with a fresh id, default title, empty content, and the
    /// current time as creation timestamp.
    pub fn new() -> Self {
        Self::with_id(NoteId::generate(), now_epoch_ms())
    }

    /// Creates a default note with caller-provided identity.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: NoteId, created_at: i64) -> Self {
        Self {
            id,
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: String::new(),
            created_at,
        }
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clocks set before the epoch collapse to `0`.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId, DEFAULT_NOTE_TITLE};

    #[test]
    fn new_note_has_defaults() {
        let note = Note::new();
        assert_eq!(note.title, DEFAULT_NOTE_TITLE);
        assert!(note.content.is_empty());
        assert!(note.created_at > 0);
        assert!(!note.id.as_str().is_empty());
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(NoteId::generate(), NoteId::generate());
    }

    #[test]
    fn serialization_uses_camel_case_wire_fields() {
        let note = Note::with_id(NoteId::from("1700000000000"), 1_700_000_000_000);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["title"], DEFAULT_NOTE_TITLE);
        assert_eq!(json["content"], "");
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert!(json.get("created_at").is_none());
    }
}
