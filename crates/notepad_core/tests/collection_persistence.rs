use notepad_core::{
    CollectionRepository, KeyValueStore, MemoryKvStore, Note, NoteId, NoteStore, PersistError,
    SqliteKvStore, StorageError, DEFAULT_STORAGE_KEY,
};

#[test]
fn load_returns_empty_when_key_is_absent() {
    let repo = CollectionRepository::new(MemoryKvStore::new());
    assert!(repo.load().is_empty());
}

#[test]
fn load_swallows_malformed_payload() {
    for raw in ["not json", "{\"id\":\"a\"}", "[{\"id\":1}]", ""] {
        let repo =
            CollectionRepository::new(MemoryKvStore::new().with_entry(DEFAULT_STORAGE_KEY, raw));
        assert!(repo.load().is_empty(), "payload {raw:?} should load as empty");
    }
}

#[test]
fn load_accepts_timestamp_ids_and_ignores_unknown_fields() {
    let raw = r#"[
        {"id":"1700000000001","title":"B","content":"two","createdAt":1700000000001,"pinned":true},
        {"id":"1700000000000","title":"A","content":"","createdAt":1700000000000}
    ]"#;
    let repo = CollectionRepository::new(MemoryKvStore::new().with_entry(DEFAULT_STORAGE_KEY, raw));

    let notes = repo.load();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, NoteId::from("1700000000001"));
    assert_eq!(notes[0].content, "two");
    assert_eq!(notes[1].created_at, 1_700_000_000_000);
}

#[test]
fn save_writes_whole_collection_as_json_array() {
    let mut repo = CollectionRepository::new(MemoryKvStore::new());
    let mut first = Note::with_id(NoteId::from("a"), 1);
    first.title = "Shopping".to_string();
    first.content = "milk".to_string();
    let second = Note::with_id(NoteId::from("b"), 2);

    repo.save(&[second.clone(), first.clone()]).unwrap();
    repo.save(std::slice::from_ref(&first)).unwrap();

    let raw = repo.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"id": "a", "title": "Shopping", "content": "milk", "createdAt": 1}
        ])
    );
}

#[test]
fn collection_survives_reopening_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.sqlite3");

    let created = {
        let mut store =
            NoteStore::open(CollectionRepository::new(SqliteKvStore::open(&path).unwrap()));
        store.create_note().unwrap();
        store.create_note().unwrap()
    };

    let reopened = NoteStore::open(CollectionRepository::new(SqliteKvStore::open(&path).unwrap()));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.list()[0], created);
}

#[test]
fn write_failure_is_reported_to_caller() {
    let mut storage = MemoryKvStore::new();
    storage.set_reject_writes(true);
    let mut store = NoteStore::open(CollectionRepository::new(storage));

    let err = store.create_note().unwrap_err();
    assert!(matches!(
        err,
        PersistError::Storage(StorageError::WriteRejected(_))
    ));
    assert!(store.is_empty());
}
