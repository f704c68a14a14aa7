//! Integration tests for `FileStorage` against a real temporary directory.

use std::fs;

use civica_storage::{FileStorage, Storage, StorageError};

fn open_temp() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::open(dir.path()).expect("open");
    (dir, storage)
}

#[test]
fn test_get_item_missing_file_returns_none() {
    let (_dir, storage) = open_temp();

    assert_eq!(storage.get_item("guardian-session").unwrap(), None);
}

#[test]
fn test_set_then_get_returns_value() {
    let (_dir, storage) = open_temp();

    storage.set_item("guardian-session", r#"{"user":"x"}"#).unwrap();

    assert_eq!(
        storage.get_item("guardian-session").unwrap().as_deref(),
        Some(r#"{"user":"x"}"#)
    );
}

#[test]
fn test_set_item_leaves_no_temp_file() {
    let (dir, storage) = open_temp();

    storage.set_item("guardian-session", "v").unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["guardian-session.json".to_string()]);
}

#[test]
fn test_remove_item_deletes_file_and_is_idempotent() {
    let (dir, storage) = open_temp();
    storage.set_item("guardian-session", "v").unwrap();

    storage.remove_item("guardian-session").unwrap();
    storage.remove_item("guardian-session").unwrap();

    assert!(!dir.path().join("guardian-session.json").exists());
    assert_eq!(storage.get_item("guardian-session").unwrap(), None);
}

#[test]
fn test_two_handles_on_same_root_share_slots() {
    // A restarted process opens the same directory and must see the
    // values written before the restart.
    let (dir, first) = open_temp();
    first.set_item("guardian-session", "persisted").unwrap();

    let second = FileStorage::open(dir.path()).unwrap();

    assert_eq!(
        second.get_item("guardian-session").unwrap().as_deref(),
        Some("persisted")
    );
}

#[test]
fn test_invalid_key_never_touches_disk() {
    let (dir, storage) = open_temp();

    let result = storage.set_item("../outside", "v");

    assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    assert!(!dir.path().parent().unwrap().join("outside.json").exists());
}

#[test]
fn test_get_item_directory_in_place_of_file_returns_io_error() {
    // A directory where the slot file should be can't be read; this surfaces as an I/O error rather than "absent".
    let (dir, storage) = open_temp();
    fs::create_dir(dir.path().join("guardian-session.json")).unwrap();

    let result = storage.get_item("guardian-session");

    assert!(
        matches!(result, Err(StorageError::Io { ref key, .. }) if key == "guardian-session"),
        "expected Io error, got {result:?}"
    );
}

#[test]
fn test_get_item_non_utf8_file_returns_invalid_data() {
    let (dir, storage) = open_temp();
    fs::write(dir.path().join("guardian-session.json"), b"\xff\xfe not json").unwrap();

    let result = storage.get_item("guardian-session");

    assert!(
        matches!(result, Err(StorageError::InvalidData { ref key, .. }) if key == "guardian-session"),
        "expected InvalidData error, got {result:?}"
    );
}
