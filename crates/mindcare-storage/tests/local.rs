use mindcare_core::models::distress::DistressLogEntry;
use mindcare_core::storage_keys;
use mindcare_storage::error::StorageError;
use mindcare_storage::local::{FileLocalStore, LocalStore, MemoryLocalStore};
use mindcare_storage::state::{append_json, load_json, load_list, save_json};

#[test]
fn memory_store_round_trips_and_removes() {
    let store = MemoryLocalStore::new();
    assert_eq!(store.get("needsCounselor").unwrap(), None);

    store.set("needsCounselor", "true").unwrap();
    assert_eq!(store.get("needsCounselor").unwrap().as_deref(), Some("true"));

    store.remove("needsCounselor").unwrap();
    assert_eq!(store.get("needsCounselor").unwrap(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileLocalStore::new(dir.path()).unwrap();
        save_json(&store, storage_keys::NEEDS_COUNSELOR, &true).unwrap();
    }

    let reopened = FileLocalStore::new(dir.path()).unwrap();
    let flag: Option<bool> = load_json(&reopened, storage_keys::NEEDS_COUNSELOR).unwrap();
    assert_eq!(flag, Some(true));
    assert!(dir.path().join("needsCounselor.json").exists());
    assert!(!dir.path().join("needsCounselor.json.tmp").exists());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileLocalStore::new(dir.path()).unwrap();
    assert!(matches!(
        store.set("../escape", "x"),
        Err(StorageError::InvalidKey(_))
    ));
    assert!(store.get("").is_err());
}

#[test]
fn removing_missing_file_key_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileLocalStore::new(dir.path()).unwrap();
    store.remove("feedbackList").unwrap();
}

#[test]
fn append_keeps_every_entry() {
    let store = MemoryLocalStore::new();
    let entry = DistressLogEntry::new(Some("u1".to_string()), "I'm broken", true);

    assert_eq!(append_json(&store, storage_keys::DISTRESS_LOGS, entry.clone()).unwrap(), 1);
    assert_eq!(append_json(&store, storage_keys::DISTRESS_LOGS, entry.clone()).unwrap(), 2);

    let logs: Vec<DistressLogEntry> = load_list(&store, storage_keys::DISTRESS_LOGS).unwrap();
    assert_eq!(logs, vec![entry.clone(), entry]);
}

#[test]
fn corrupt_blob_surfaces_serialization_error() {
    let store = MemoryLocalStore::new();
    store.set(storage_keys::FEEDBACK_LIST, "{not json").unwrap();
    let result: Result<Vec<serde_json::Value>, _> = load_list(&store, storage_keys::FEEDBACK_LIST);
    assert!(matches!(result, Err(StorageError::Serialization(_))));
}
