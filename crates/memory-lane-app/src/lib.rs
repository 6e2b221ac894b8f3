//! Memory Lane — terminal front-end.
//!
//! Reads one command per line, drives a [`session::GameSession`], and
//! renders every update as text.

pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod sleeper;
pub mod terminal;
