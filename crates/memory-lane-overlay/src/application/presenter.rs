//! Hotspot presentation and overlay click handling.

use memory_lane_content::StoryContent;
use memory_lane_content::rich_text::render_rich_text;
use memory_lane_core::command::Command;
use memory_lane_core::surface::{Overlay, Surface, Update, render};
use tracing::{debug, info};

use crate::domain::commands::{ClickOverlay, SelectHotspot};
use crate::domain::hotspots::{HotspotId, HotspotRegistry, Scene};
use crate::domain::modals::ModalManager;

/// Renders `text` and an optional image into the info panel and presents
/// it. An absent or empty image clears whatever image was shown before.
pub fn show_info(
    text: &str,
    image: Option<&str>,
    image_alt: &str,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) {
    render(
        surface,
        Update::InfoText {
            html: render_rich_text(text),
        },
    );
    render(
        surface,
        Update::ClueImage {
            src: image.filter(|src| !src.is_empty()).map(str::to_owned),
            alt: image_alt.to_owned(),
        },
    );
    modals.open(Overlay::Info, surface);
}

/// Handles the `SelectHotspot` command. Returns `false` for an id with no
/// live binding.
pub fn handle_select_hotspot(
    command: &SelectHotspot,
    registry: &HotspotRegistry,
    image_alt: &str,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) -> bool {
    let Some(binding) = registry.get(&command.hotspot_id) else {
        debug!(hotspot_id = %command.hotspot_id, "no binding for hotspot");
        return false;
    };

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        hotspot_id = %command.hotspot_id,
        "handling select_hotspot command"
    );

    show_info(
        &binding.info,
        binding.clue_image.as_deref(),
        image_alt,
        modals,
        surface,
    );
    true
}

/// Handles the `ClickOverlay` command. Returns whether the overlay closed.
pub fn handle_click_overlay(
    command: &ClickOverlay,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) -> bool {
    debug!(
        command = command.command_type(),
        overlay = %command.overlay,
        target = ?command.target,
        "handling overlay click"
    );
    modals.click(command.overlay, command.target, surface)
}

/// Binds every slide hotspot of `story`. Returns how many were bound.
pub fn bind_slide_hotspots(registry: &mut HotspotRegistry, story: &StoryContent) -> usize {
    let mut bound = 0;
    for (index, slide) in story.slides.iter().enumerate() {
        for hotspot in &slide.hotspots {
            registry.bind(
                HotspotId::new(&hotspot.id),
                Scene::Slide(index),
                &hotspot.info,
                hotspot.clue_image.clone(),
            );
            bound += 1;
        }
    }
    bound
}

/// Discards every finale binding and binds the finale hotspots afresh.
/// Finale hotspots never carry an image. Returns how many were bound.
pub fn rebind_finale_hotspots(registry: &mut HotspotRegistry, story: &StoryContent) -> usize {
    let discarded = registry.unbind_scene(Scene::Finale);
    for hotspot in &story.finale.hotspots {
        registry.bind(HotspotId::new(&hotspot.id), Scene::Finale, &hotspot.info, None);
    }
    debug!(
        discarded,
        bound = story.finale.hotspots.len(),
        "finale hotspots rebound"
    );
    story.finale.hotspots.len()
}
