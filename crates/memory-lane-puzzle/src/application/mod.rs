//! Application layer for the puzzle context.

pub mod command_handlers;
pub mod query_handlers;
