//! Domain layer for the intro context.

pub mod aggregates;
pub mod commands;
pub mod events;
