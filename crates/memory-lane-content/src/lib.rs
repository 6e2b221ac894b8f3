//! Memory Lane — story content catalog.
//!
//! Slides, puzzles, hotspots, the finale scene and the intro script are
//! authored as YAML. A built-in story ships with the crate; a replacement
//! can be loaded from disk.

pub mod catalog;
pub mod rich_text;

pub use catalog::{
    ContentError, FinaleContent, HotspotContent, IntroContent, Labels, PuzzleContent,
    SlideContent, StoryContent,
};
