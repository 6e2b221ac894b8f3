//! Memory Lane — first-visit intro sequence context.
//!
//! Types the intro script line by line, fades it out, reveals the entry
//! control, and dismisses the overlay once the player enters. Returning
//! players skip straight past it.

pub mod application;
pub mod domain;
