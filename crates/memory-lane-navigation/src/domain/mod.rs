//! Domain layer for the navigation context.

pub mod aggregates;
pub mod commands;
pub mod events;
