//! Commands for the overlay context.

use memory_lane_core::command::Command;
use memory_lane_core::surface::Overlay;
use uuid::Uuid;

use super::hotspots::HotspotId;
use super::modals::ClickTarget;

/// Command raised by a click on a hotspot.
#[derive(Debug, Clone)]
pub struct SelectHotspot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clicked hotspot.
    pub hotspot_id: HotspotId,
}

impl Command for SelectHotspot {
    fn command_type(&self) -> &'static str {
        "overlay.select_hotspot"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command raised by a click inside an overlay.
#[derive(Debug, Clone)]
pub struct ClickOverlay {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The overlay that received the click.
    pub overlay: Overlay,
    /// What part of the overlay was hit.
    pub target: ClickTarget,
}

impl Command for ClickOverlay {
    fn command_type(&self) -> &'static str {
        "overlay.click"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
