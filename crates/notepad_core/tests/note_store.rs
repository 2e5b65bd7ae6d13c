use notepad_core::{
    CollectionRepository, MemoryKvStore, NoteId, NoteStore, DEFAULT_NOTE_TITLE,
};
use std::collections::HashSet;

fn setup() -> NoteStore<MemoryKvStore> {
    NoteStore::open(CollectionRepository::new(MemoryKvStore::new()))
}

fn reload(store: NoteStore<MemoryKvStore>) -> NoteStore<MemoryKvStore> {
    NoteStore::open(store.into_repository())
}

#[test]
fn creating_n_notes_yields_unique_ids_newest_first() {
    let mut store = setup();
    let created: Vec<_> = (0..5).map(|_| store.create_note().unwrap()).collect();

    assert_eq!(store.len(), 5);
    let ids: HashSet<_> = store.list().iter().map(|note| note.id.clone()).collect();
    assert_eq!(ids.len(), 5);

    let listed: Vec<_> = store.list().iter().map(|note| note.id.clone()).collect();
    let expected: Vec<_> = created.iter().rev().map(|note| note.id.clone()).collect();
    assert_eq!(listed, expected);
}

#[test]
fn created_note_has_defaults_and_is_persisted() {
    let mut store = setup();
    let note = store.create_note().unwrap();

    assert_eq!(note.title, DEFAULT_NOTE_TITLE);
    assert_eq!(note.content, "");
    assert!(note.created_at > 0);

    let store = reload(store);
    assert_eq!(store.list(), &[note]);
}

#[test]
fn create_two_then_delete_newest() {
    let mut store = setup();
    let a = store.create_note().unwrap();
    let b = store.create_note().unwrap();
    assert_eq!(store.list(), &[b.clone(), a.clone()]);

    assert!(store.delete_note(&b.id).unwrap());
    assert_eq!(store.list(), &[a.clone()]);

    let store = reload(store);
    assert_eq!(store.list(), &[a]);
}

#[test]
fn deleting_unknown_id_is_a_noop() {
    let mut store = setup();
    let a = store.create_note().unwrap();

    assert!(!store.delete_note(&NoteId::from("missing")).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0], a);
}

#[test]
fn deleting_last_note_persists_empty_collection() {
    let mut store = setup();
    let a = store.create_note().unwrap();
    store.delete_note(&a.id).unwrap();

    let store = reload(store);
    assert!(store.is_empty());
}

#[test]
fn update_preserves_identity_and_creation_time() {
    let mut store = setup();
    let a = store.create_note().unwrap();
    let b = store.create_note().unwrap();

    let updated = store
        .update_note(&a.id, "Shopping", "milk, eggs")
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.created_at, a.created_at);
    assert_eq!(updated.title, "Shopping");
    assert_eq!(updated.content, "milk, eggs");

    let store = reload(store);
    assert_eq!(store.list()[0], b);
    assert_eq!(store.list()[1], updated);
}

#[test]
fn update_unknown_id_changes_nothing() {
    let mut store = setup();
    let a = store.create_note().unwrap();

    let result = store.update_note(&NoteId::from("missing"), "x", "y").unwrap();
    assert!(result.is_none());
    assert_eq!(store.list(), &[a]);
}
