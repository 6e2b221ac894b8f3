//! Memory Lane Core — shared abstractions.
//!
//! This crate defines the traits and types every context depends on: time,
//! suspension, durable key-value storage, render binding points, domain
//! events and errors. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod sleeper;
pub mod store;
pub mod surface;
pub mod timer;
