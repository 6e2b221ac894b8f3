//! Progress snapshot and intro marker.
//!
//! Only player state is stored: which puzzles are solved and whether the
//! finale has been triggered. Answers, solution texts and the open puzzle
//! selector are defined by content and never written.

use memory_lane_core::error::DomainError;
use memory_lane_core::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::keys::{INTRO_PLAYED_KEY, INTRO_PLAYED_MARKER, PROGRESS_KEY};

/// The persisted shape of `puzzleGameState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    /// Solved flag per puzzle, index-aligned with the slides.
    pub solved_puzzles: Vec<bool>,
    /// Whether the finale has been triggered at least once.
    #[serde(default)]
    pub final_url_shown: bool,
}

impl SavedProgress {
    /// Progress of a first visit: nothing solved.
    #[must_use]
    pub fn fresh(puzzle_count: usize) -> Self {
        Self {
            solved_puzzles: vec![false; puzzle_count],
            final_url_shown: false,
        }
    }

    /// Returns whether every puzzle is solved.
    #[must_use]
    pub fn all_solved(&self) -> bool {
        self.solved_puzzles.iter().all(|solved| *solved)
    }
}

/// Writes `progress` under the progress key.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization or the store write
/// fails.
pub async fn save_progress(
    store: &dyn KeyValueStore,
    progress: &SavedProgress,
) -> Result<(), DomainError> {
    let payload = serde_json::to_string(progress)
        .map_err(|e| DomainError::Infrastructure(format!("progress serialization failed: {e}")))?;
    store.set(PROGRESS_KEY, &payload).await?;
    debug!(payload = %payload, "progress saved");
    Ok(())
}

/// Reads the progress snapshot for a story with `puzzle_count` puzzles.
///
/// Returns `None` when nothing was ever saved. A failing store or a payload
/// that does not match the expected shape is logged and also yields `None`,
/// so callers always start from a consistent state.
pub async fn load_progress(store: &dyn KeyValueStore, puzzle_count: usize) -> Option<SavedProgress> {
    let raw = match store.get(PROGRESS_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(error = %err, "progress could not be read; starting fresh");
            return None;
        }
    };

    let mut progress: SavedProgress = match serde_json::from_str(&raw) {
        Ok(progress) => progress,
        Err(err) => {
            warn!(error = %err, "malformed progress payload; starting fresh");
            return None;
        }
    };

    if progress.solved_puzzles.len() != puzzle_count {
        warn!(
            expected = puzzle_count,
            found = progress.solved_puzzles.len(),
            "progress payload has the wrong puzzle count; starting fresh"
        );
        return None;
    }

    // The finale flag can only be set once everything is solved.
    if progress.final_url_shown && !progress.all_solved() {
        warn!("progress payload marks the finale shown with unsolved puzzles; clearing flag");
        progress.final_url_shown = false;
    }

    Some(progress)
}

/// Returns whether the intro marker is present.
///
/// An unreadable store counts as "not played", so the intro plays again
/// rather than being lost.
pub async fn has_played_intro(store: &dyn KeyValueStore) -> bool {
    match store.get(INTRO_PLAYED_KEY).await {
        Ok(value) => value.is_some_and(|value| !value.is_empty()),
        Err(err) => {
            warn!(error = %err, "intro marker could not be read");
            false
        }
    }
}

/// Writes the intro marker.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store write fails.
pub async fn mark_intro_played(store: &dyn KeyValueStore) -> Result<(), DomainError> {
    store.set(INTRO_PLAYED_KEY, INTRO_PLAYED_MARKER).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_lane_test_support::{FailingKeyValueStore, InMemoryKeyValueStore};

    #[tokio::test]
    async fn test_save_progress_writes_only_player_state() {
        // Arrange
        let store = InMemoryKeyValueStore::new();
        let progress = SavedProgress {
            solved_puzzles: vec![true, false, true],
            final_url_shown: false,
        };

        // Act
        save_progress(&store, &progress).await.unwrap();

        // Assert
        let raw = store.raw(PROGRESS_KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "solvedPuzzles": [true, false, true],
                "finalUrlShown": false
            })
        );
    }

    #[tokio::test]
    async fn test_load_progress_returns_none_when_never_saved() {
        let store = InMemoryKeyValueStore::new();

        assert_eq!(load_progress(&store, 3).await, None);
    }

    #[tokio::test]
    async fn test_load_progress_reads_saved_snapshot() {
        // Arrange
        let store = InMemoryKeyValueStore::with_entry(
            PROGRESS_KEY,
            r#"{"solvedPuzzles":[true,true,true],"finalUrlShown":true}"#,
        );

        // Act
        let progress = load_progress(&store, 3).await.unwrap();

        // Assert
        assert!(progress.all_solved());
        assert!(progress.final_url_shown);
    }

    #[tokio::test]
    async fn test_load_progress_defaults_missing_finale_flag() {
        let store =
            InMemoryKeyValueStore::with_entry(PROGRESS_KEY, r#"{"solvedPuzzles":[true,false,false]}"#);

        let progress = load_progress(&store, 3).await.unwrap();

        assert_eq!(progress.solved_puzzles, vec![true, false, false]);
        assert!(!progress.final_url_shown);
    }

    #[tokio::test]
    async fn test_load_progress_rejects_wrong_length() {
        let store = InMemoryKeyValueStore::with_entry(
            PROGRESS_KEY,
            r#"{"solvedPuzzles":[true,true],"finalUrlShown":false}"#,
        );

        assert_eq!(load_progress(&store, 3).await, None);
    }

    #[tokio::test]
    async fn test_load_progress_rejects_invalid_json() {
        let store = InMemoryKeyValueStore::with_entry(PROGRESS_KEY, "{not json");

        assert_eq!(load_progress(&store, 3).await, None);
    }

    #[tokio::test]
    async fn test_load_progress_rejects_wrong_shape() {
        let store = InMemoryKeyValueStore::with_entry(
            PROGRESS_KEY,
            r#"{"solvedPuzzles":"yes","finalUrlShown":true}"#,
        );

        assert_eq!(load_progress(&store, 3).await, None);
    }

    #[tokio::test]
    async fn test_load_progress_clears_finale_flag_when_unsolved() {
        let store = InMemoryKeyValueStore::with_entry(
            PROGRESS_KEY,
            r#"{"solvedPuzzles":[true,false,true],"finalUrlShown":true}"#,
        );

        let progress = load_progress(&store, 3).await.unwrap();

        assert!(!progress.final_url_shown);
    }

    #[tokio::test]
    async fn test_load_progress_treats_failing_store_as_fresh() {
        assert_eq!(load_progress(&FailingKeyValueStore, 3).await, None);
    }

    #[tokio::test]
    async fn test_intro_marker_round_trip() {
        // Arrange
        let store = InMemoryKeyValueStore::new();
        assert!(!has_played_intro(&store).await);

        // Act
        mark_intro_played(&store).await.unwrap();

        // Assert
        assert!(has_played_intro(&store).await);
        assert_eq!(store.raw(INTRO_PLAYED_KEY).as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_empty_intro_marker_counts_as_not_played() {
        let store = InMemoryKeyValueStore::with_entry(INTRO_PLAYED_KEY, "");

        assert!(!has_played_intro(&store).await);
    }

    #[tokio::test]
    async fn test_failing_store_reports_intro_not_played() {
        assert!(!has_played_intro(&FailingKeyValueStore).await);
        assert!(mark_intro_played(&FailingKeyValueStore).await.is_err());
    }
}
