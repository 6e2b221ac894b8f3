//! Domain layer for the overlay context.

pub mod commands;
pub mod hotspots;
pub mod modals;
