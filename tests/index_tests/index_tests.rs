//! Tests for Index
//!
//! These tests verify:
//! - Creating an empty index on first load
//! - Monotonic id allocation that survives deletes and restarts
//! - Persistence of every mutation
//! - Refusal to load corrupt or mismatched index files

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use warden::index::{Index, IndexSnapshot, INDEX_FILENAME};
use warden::{SyncMode, WardenError};

const BLOCK_SIZE: usize = 4096;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}

fn load(path: &PathBuf) -> Index {
    Index::load(path, BLOCK_SIZE, SyncMode::None).unwrap()
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_creates_empty_index() {
    let (_temp, path) = setup_temp_dir();

    let index = load(&path);

    assert!(index.is_empty());
    assert_eq!(index.next_id(), 0);
    assert!(path.join(INDEX_FILENAME).exists());
}

#[test]
fn test_load_existing_index() {
    let (_temp, path) = setup_temp_dir();

    {
        let mut index = load(&path);
        let id = index.allocate_id().unwrap();
        index.set("github", id).unwrap();
    }

    let index = load(&path);
    assert_eq!(index.get("github"), Some(0));
    assert_eq!(index.next_id(), 1);
    assert_eq!(index.len(), 1);
}

// =============================================================================
// Allocation Tests
// =============================================================================

#[test]
fn test_allocate_id_is_monotonic() {
    let (_temp, path) = setup_temp_dir();
    let mut index = load(&path);

    let ids: Vec<u64> = (0..5).map(|_| index.allocate_id().unwrap()).collect();

    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert_eq!(index.next_id(), 5);
}

#[test]
fn test_allocate_id_never_reuses_after_remove() {
    let (_temp, path) = setup_temp_dir();
    let mut index = load(&path);

    for key in ["a", "b", "c"] {
        let id = index.allocate_id().unwrap();
        index.set(key, id).unwrap();
    }
    assert_eq!(index.remove("b").unwrap(), Some(1));

    // Two live keys, but the next id must not be 2
    let id = index.allocate_id().unwrap();
    assert_eq!(id, 3);
}

#[test]
fn test_allocated_id_persists_without_set() {
    let (_temp, path) = setup_temp_dir();

    {
        let mut index = load(&path);
        index.allocate_id().unwrap();
        index.allocate_id().unwrap();
    }

    let mut index = load(&path);
    assert!(index.is_empty());
    assert_eq!(index.allocate_id().unwrap(), 2);
}

// =============================================================================
// Mapping Tests
// =============================================================================

#[test]
fn test_get_missing_key() {
    let (_temp, path) = setup_temp_dir();
    let index = load(&path);

    assert_eq!(index.get("missing"), None);
}

#[test]
fn test_remove_missing_key() {
    let (_temp, path) = setup_temp_dir();
    let mut index = load(&path);

    assert_eq!(index.remove("missing").unwrap(), None);
}

#[test]
fn test_remove_persists() {
    let (_temp, path) = setup_temp_dir();

    {
        let mut index = load(&path);
        let id = index.allocate_id().unwrap();
        index.set("github", id).unwrap();
        index.remove("github").unwrap();
    }

    let index = load(&path);
    assert_eq!(index.get("github"), None);
    assert_eq!(index.next_id(), 1);
}

#[test]
fn test_keys_sorted() {
    let (_temp, path) = setup_temp_dir();
    let mut index = load(&path);

    for key in ["zeta", "alpha", "mid"] {
        let id = index.allocate_id().unwrap();
        index.set(key, id).unwrap();
    }

    assert_eq!(index.keys(), vec!["alpha", "mid", "zeta"]);

    let entries: Vec<(&str, u64)> = index.entries().collect();
    assert_eq!(entries, vec![("alpha", 1), ("mid", 2), ("zeta", 0)]);
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_load_garbage_is_corrupt_index() {
    let (_temp, path) = setup_temp_dir();
    fs::write(path.join(INDEX_FILENAME), b"{\"github\": \"0\"}").unwrap();

    let result = Index::load(&path, BLOCK_SIZE, SyncMode::None);

    match result {
        Err(e @ WardenError::CorruptIndex(_)) => assert!(!e.is_recoverable()),
        Err(e) => panic!("expected CorruptIndex, got {:?}", e),
        Ok(_) => panic!("expected CorruptIndex, got Ok"),
    }
}

#[test]
fn test_load_truncated_is_corrupt_index() {
    let (_temp, path) = setup_temp_dir();
    fs::write(path.join(INDEX_FILENAME), b"WID").unwrap();

    let result = Index::load(&path, BLOCK_SIZE, SyncMode::None);

    assert!(matches!(result, Err(WardenError::CorruptIndex(_))));
}

#[test]
fn test_load_flipped_byte_is_corrupt_index() {
    let (_temp, path) = setup_temp_dir();

    {
        let mut index = load(&path);
        let id = index.allocate_id().unwrap();
        index.set("github", id).unwrap();
    }

    let file = path.join(INDEX_FILENAME);
    let mut bytes = fs::read(&file).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&file, bytes).unwrap();

    let result = Index::load(&path, BLOCK_SIZE, SyncMode::None);

    assert!(matches!(result, Err(WardenError::CorruptIndex(_))));
}

#[test]
fn test_load_entry_beyond_counter_is_corrupt_index() {
    let (_temp, path) = setup_temp_dir();

    let mut entries = BTreeMap::new();
    entries.insert("github".to_string(), 7);
    let snapshot = IndexSnapshot {
        block_size: BLOCK_SIZE as u32,
        next_id: 3,
        entries,
    };
    fs::write(path.join(INDEX_FILENAME), snapshot.encode().unwrap()).unwrap();

    let result = Index::load(&path, BLOCK_SIZE, SyncMode::None);

    assert!(matches!(result, Err(WardenError::CorruptIndex(_))));
}

#[test]
fn test_load_block_size_mismatch() {
    let (_temp, path) = setup_temp_dir();
    load(&path);

    let result = Index::load(&path, 512, SyncMode::None);

    assert!(matches!(result, Err(WardenError::Config(_))));
}

#[test]
fn test_snapshot_roundtrip_through_file_format() {
    let (_temp, path) = setup_temp_dir();

    {
        let mut index = Index::load(&path, BLOCK_SIZE, SyncMode::Full).unwrap();
        let id = index.allocate_id().unwrap();
        index.set("github", id).unwrap();
    }

    let bytes = fs::read(path.join(INDEX_FILENAME)).unwrap();
    assert_eq!(&bytes[0..4], b"WIDX");

    let snapshot = IndexSnapshot::decode(&bytes).unwrap();
    assert_eq!(snapshot.block_size, BLOCK_SIZE as u32);
    assert_eq!(snapshot.next_id, 1);
    assert_eq!(snapshot.entries.get("github"), Some(&0));
}
