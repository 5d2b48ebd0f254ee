//! Tests for CheckpointStore

use super::*;
use tempfile::tempdir;

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_store_new() {
    let store = CheckpointStore::new("/tmp/igdb-checkpoint.json");
    assert!(!store.is_in_memory());
    assert_eq!(store.path().to_str().unwrap(), "/tmp/igdb-checkpoint.json");
}

#[test]
fn test_store_in_memory() {
    let store = CheckpointStore::in_memory();
    assert!(store.is_in_memory());
}

#[test]
fn test_from_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = CheckpointStore::from_file(dir.path().join("absent.json")).unwrap();
    assert!(!store.is_in_memory());
}

#[test]
fn test_from_corrupt_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("checkpoint.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = CheckpointStore::from_file(&path).unwrap_err();
    assert!(matches!(err, crate::error::Error::Checkpoint { .. }));
}

// ============================================================================
// Offset Tests
// ============================================================================

#[tokio::test]
async fn test_record_and_read_offset() {
    let store = CheckpointStore::in_memory();
    assert_eq!(store.next_offset("games").await, None);

    store.record_page("games", 500).await.unwrap();
    store.record_page("games", 1000).await.unwrap();

    assert_eq!(store.next_offset("games").await, Some(1000));
    assert_eq!(store.state().await.get("games").unwrap().pages_persisted, 2);
}

#[tokio::test]
async fn test_endpoints_are_independent() {
    let store = CheckpointStore::in_memory();
    store.record_page("games", 500).await.unwrap();
    store.record_page("platforms", 1500).await.unwrap();
    store.clear("games").await.unwrap();

    assert_eq!(store.next_offset("games").await, None);
    assert_eq!(store.next_offset("platforms").await, Some(1500));
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_record_persists_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("checkpoint.json");

    let store = CheckpointStore::new(&path);
    store.record_page("games", 2500).await.unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let reloaded = CheckpointStore::from_file(&path).unwrap();
    assert_eq!(reloaded.next_offset("games").await, Some(2500));
}

#[tokio::test]
async fn test_clear_persists_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("checkpoint.json");

    let store = CheckpointStore::new(&path);
    store.record_page("games", 500).await.unwrap();
    store.clear("games").await.unwrap();

    let reloaded = CheckpointStore::from_file(&path).unwrap();
    assert_eq!(reloaded.next_offset("games").await, None);
}

#[tokio::test]
async fn test_clone_shares_state() {
    let store = CheckpointStore::in_memory();
    let clone = store.clone();

    store.record_page("games", 500).await.unwrap();
    assert_eq!(clone.next_offset("games").await, Some(500));
}
