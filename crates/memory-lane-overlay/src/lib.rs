//! Memory Lane — overlays and hotspot presentation context.
//!
//! Responsible for which overlays are presented, background-click closing,
//! the hotspot listener registry, and rendering hotspot info.

pub mod application;
pub mod domain;
