//! Application layer for the overlay context.

pub mod presenter;
