//! Flat record store tests
//!
//! Tests for collection persistence including:
//! - Missing, empty and corrupt files read as empty collections
//! - Whole-collection writes with directory creation
//! - Failed updates leave the file untouched
//! - Write failures are reported to the caller
//! - Concurrent updates are serialized per collection

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use waste_ops_backend::store::{Collection, Store};
use waste_ops_backend::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    key: String,
    value: u32,
}

fn entry(key: &str, value: u32) -> Entry {
    Entry {
        key: key.to_string(),
        value,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_collection_layout() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");

        assert_eq!(collection.name(), "entries");
        assert_eq!(collection.path(), dir.path().join("entries").join("entries.json"));
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");

        assert!(collection.load().await.is_empty());
        assert!(!collection.path().exists());
    }

    #[tokio::test]
    async fn test_empty_and_corrupt_files_read_empty() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");
        std::fs::create_dir_all(collection.path().parent().unwrap()).unwrap();

        std::fs::write(collection.path(), "  \n").unwrap();
        assert!(collection.load().await.is_empty());

        std::fs::write(collection.path(), "{ not json").unwrap();
        assert!(collection.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");

        collection.save(&[entry("a", 1), entry("b", 2)]).await.unwrap();

        assert!(collection.path().exists());
        assert!(!collection.path().with_extension("json.tmp").exists());
        assert_eq!(collection.load().await, vec![entry("a", 1), entry("b", 2)]);

        let raw = std::fs::read_to_string(collection.path()).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains('\n'), "collection files are pretty-printed");
    }

    #[tokio::test]
    async fn test_corrupt_file_replaced_on_next_write() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");
        std::fs::create_dir_all(collection.path().parent().unwrap()).unwrap();
        std::fs::write(collection.path(), "garbage").unwrap();

        collection
            .update(|entries| {
                entries.push(entry("fresh", 1));
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(collection.load().await, vec![entry("fresh", 1)]);
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");
        collection.save(&[entry("a", 1)]).await.unwrap();
        let before = std::fs::read(collection.path()).unwrap();

        let result: Result<(), AppError> = collection
            .update(|entries| {
                entries.clear();
                Err(AppError::NotFound("Entry".into()))
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(std::fs::read(collection.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_blocked_directory_reports_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");
        // A plain file where the collection directory should be
        std::fs::write(dir.path().join("entries"), "not a directory").unwrap();

        let result = collection.save(&[entry("a", 1)]).await;
        assert!(matches!(result, Err(AppError::StorageError(_))));

        let result: Result<(), AppError> = collection
            .update(|entries| {
                entries.push(entry("b", 2));
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(AppError::StorageError(_))));
        assert!(collection.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_lock_commit_persists() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Collection<Entry> = Collection::new(dir.path(), "entries");

        let mut locked = collection.lock().await;
        locked.records.push(entry("x", 9));
        locked.commit().await.unwrap();

        assert_eq!(collection.load().await, vec![entry("x", 9)]);
    }

    #[tokio::test]
    async fn test_store_init_creates_every_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        store.init().await.unwrap();

        for name in ["lots", "pickups", "materials", "sales", "reports"] {
            let path = dir.path().join(name).join(format!("{}.json", name));
            assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]", "{}", name);
        }

        // A second init leaves existing files alone
        std::fs::write(dir.path().join("sales").join("sales.json"), "[ ]").unwrap();
        store.init().await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("sales").join("sales.json")).unwrap(),
            "[ ]"
        );
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let collection: Arc<Collection<Entry>> =
            Arc::new(Collection::new(dir.path(), "entries"));

        let mut handles = Vec::new();
        for i in 0..25u32 {
            let collection = collection.clone();
            handles.push(tokio::spawn(async move {
                collection
                    .update(|entries| {
                        entries.push(entry(&format!("k{}", i), i));
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut values: Vec<u32> = collection.load().await.into_iter().map(|e| e.value).collect();
        values.sort_unstable();
        assert_eq!(values, (0..25).collect::<Vec<_>>());
    }
}
