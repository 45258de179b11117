//! Tests for the `LocalStorage` backends, run against both implementations.

use docbrowser::database::Database;
use docbrowser::storage::{LocalStorage, MemoryStorage, SqliteStorage};
use docbrowser::types::errors::StorageError;
use rstest::rstest;
use tempfile::TempDir;

fn memory() -> Box<dyn LocalStorage> {
    Box::new(MemoryStorage::new())
}

fn sqlite() -> Box<dyn LocalStorage> {
    Box::new(SqliteStorage::open_in_memory().unwrap())
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn missing_key_reads_as_none(#[case] store: Box<dyn LocalStorage>) {
    assert_eq!(store.get_item("frequently-viewed-documents").unwrap(), None);
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn set_item_overwrites(#[case] mut store: Box<dyn LocalStorage>) {
    store.set_item("k", "[]").unwrap();
    store.set_item("k", "[1]").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("[1]"));
}

#[rstest]
#[case::memory(memory())]
#[case::sqlite(sqlite())]
fn remove_and_clear(#[case] mut store: Box<dyn LocalStorage>) {
    store.set_item("a", "1").unwrap();
    store.set_item("b", "2").unwrap();

    store.remove_item("a").unwrap();
    assert_eq!(store.get_item("a").unwrap(), None);
    assert_eq!(store.get_item("b").unwrap().as_deref(), Some("2"));

    // Removing a missing key is not an error.
    store.remove_item("a").unwrap();

    store.clear().unwrap();
    assert_eq!(store.get_item("b").unwrap(), None);
}

#[test]
fn sqlite_storage_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local.db");

    {
        let mut store = SqliteStorage::new(Database::open(&path).unwrap());
        store.set_item("frequently-viewed-documents", "[]").unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    let store = SqliteStorage::new(Database::open(&path).unwrap());
    assert_eq!(
        store.get_item("frequently-viewed-documents").unwrap().as_deref(),
        Some("[]")
    );
    assert!(!store.is_empty().unwrap());
}

#[test]
fn memory_quota_rejects_oversized_write_and_keeps_old_value() {
    let mut store = MemoryStorage::with_quota(16);
    store.set_item("key", "small").unwrap();

    let err = store.set_item("key", "this value is far too large").unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
    assert_eq!(store.get_item("key").unwrap().as_deref(), Some("small"));
    assert_eq!(store.used_bytes(), 8);
}

#[test]
fn memory_unavailable_can_be_restored() {
    let mut store = MemoryStorage::new();
    store.set_item("k", "v").unwrap();

    store.set_available(false);
    assert!(!store.is_available());
    assert!(matches!(store.get_item("k"), Err(StorageError::Unavailable(_))));

    store.set_available(true);
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
}
