//! Application layer for the navigation context.

pub mod command_handlers;
pub mod query_handlers;
