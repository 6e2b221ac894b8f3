//! Storage keys and fixed values.

/// Key of the puzzle progress snapshot.
pub const PROGRESS_KEY: &str = "puzzleGameState";

/// Key of the "intro already played" marker.
pub const INTRO_PLAYED_KEY: &str = "hasPlayedIntro";

/// Value written under [`INTRO_PLAYED_KEY`].
pub const INTRO_PLAYED_MARKER: &str = "true";
