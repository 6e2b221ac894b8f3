//! Overlay presentation state.

use std::collections::BTreeSet;

use memory_lane_core::surface::{Overlay, Surface, Update, render};

/// Which part of an overlay a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the content.
    Background,
    /// The content panel itself.
    Content,
    /// The overlay's close control.
    CloseControl,
}

/// Tracks which overlays are presented and renders every change.
#[derive(Debug, Default)]
pub struct ModalManager {
    open: BTreeSet<Overlay>,
}

impl ModalManager {
    /// Creates a manager with every overlay hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Presents `overlay`. Re-opening an open overlay re-renders it.
    pub fn open(&mut self, overlay: Overlay, surface: &dyn Surface) {
        self.open.insert(overlay);
        render(
            surface,
            Update::OverlayVisible {
                overlay,
                visible: true,
            },
        );
    }

    /// Hides `overlay`. Closing a hidden overlay re-renders it hidden.
    pub fn close(&mut self, overlay: Overlay, surface: &dyn Surface) {
        self.open.remove(&overlay);
        render(
            surface,
            Update::OverlayVisible {
                overlay,
                visible: false,
            },
        );
    }

    /// Applies a click on `overlay`. Background and close-control clicks
    /// close it; content clicks do nothing. Returns whether it closed.
    pub fn click(&mut self, overlay: Overlay, target: ClickTarget, surface: &dyn Surface) -> bool {
        match target {
            ClickTarget::Background | ClickTarget::CloseControl => {
                self.close(overlay, surface);
                true
            }
            ClickTarget::Content => false,
        }
    }

    /// Returns whether `overlay` is presented.
    #[must_use]
    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.open.contains(&overlay)
    }

    /// Returns every presented overlay.
    #[must_use]
    pub fn open_overlays(&self) -> Vec<Overlay> {
        self.open.iter().copied().collect()
    }
}
