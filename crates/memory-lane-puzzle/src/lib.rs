//! Memory Lane — puzzle verification and completion context.
//!
//! Responsible for the answer prompts, strict answer checking, per-puzzle
//! solved flags, the one-time finale unlock, and restoring saved progress.

pub mod application;
pub mod domain;
