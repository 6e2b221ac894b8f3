//! Memory Lane — durable player state.
//!
//! Stores the puzzle progress snapshot and the intro marker in a
//! [`KeyValueStore`](memory_lane_core::store::KeyValueStore), and provides a
//! JSON-file-backed implementation of that store.

pub mod json_file_store;
pub mod keys;
pub mod progress;
