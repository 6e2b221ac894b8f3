//! Integration tests for `JsonFileStore`.

use std::path::PathBuf;

use memory_lane_core::store::KeyValueStore;
use memory_lane_persistence::json_file_store::JsonFileStore;
use memory_lane_persistence::keys::PROGRESS_KEY;
use memory_lane_persistence::progress::{SavedProgress, load_progress, save_progress};

/// Returns a fresh scratch path unique to this test process and `name`.
fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "memory-lane-store-{}-{name}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("state.json")
}

// --- open ---

#[tokio::test]
async fn test_open_missing_file_is_empty() {
    let store = JsonFileStore::open(scratch_path("missing")).await;

    assert_eq!(store.get(PROGRESS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_open_corrupt_file_is_empty() {
    let path = scratch_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[1, 2, 3").unwrap();

    let store = JsonFileStore::open(&path).await;

    assert_eq!(store.get(PROGRESS_KEY).await.unwrap(), None);
}

// --- set + reopen ---

#[tokio::test]
async fn test_values_survive_reopen() {
    // Arrange
    let path = scratch_path("reopen");
    let store = JsonFileStore::open(&path).await;

    // Act
    store.set("hasPlayedIntro", "true").await.unwrap();
    drop(store);
    let reopened = JsonFileStore::open(&path).await;

    // Assert
    assert_eq!(
        reopened.get("hasPlayedIntro").await.unwrap().as_deref(),
        Some("true")
    );
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_progress_survives_reload() {
    // Arrange
    let path = scratch_path("progress");
    let store = JsonFileStore::open(&path).await;
    let progress = SavedProgress {
        solved_puzzles: vec![true, true, true],
        final_url_shown: true,
    };

    // Act
    save_progress(&store, &progress).await.unwrap();
    let reloaded = JsonFileStore::open(&path).await;

    // Assert
    assert_eq!(load_progress(&reloaded, 3).await, Some(progress));
}

#[tokio::test]
async fn test_corrupt_file_is_replaced_on_write() {
    // Arrange
    let path = scratch_path("replace");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "garbage").unwrap();
    let store = JsonFileStore::open(&path).await;

    // Act
    store.set("hasPlayedIntro", "true").await.unwrap();

    // Assert
    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({ "hasPlayedIntro": "true" }));
}
