//! Application layer for the intro context.

pub mod command_handlers;
pub mod query_handlers;
