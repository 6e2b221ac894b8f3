//! Memory Lane — carousel navigation context.
//!
//! Responsible for the active slide, wrap-around stepping in either
//! direction, swipe mapping, and the slide offset and indicator rendering.

pub mod application;
pub mod domain;
