//! Domain layer for the puzzle context.

pub mod aggregates;
pub mod commands;
pub mod events;
