//! Command handlers for the navigation context.
//!
//! Handlers execute a command against the carousel, render the resulting
//! position, and hand back the produced events.

use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::command::Command;
use memory_lane_core::surface::{Surface, Update, render};
use tracing::{debug, info};

use crate::domain::aggregates::Carousel;
use crate::domain::commands::{Navigate, Swipe};
use crate::domain::events::NavigationEvent;

/// Renders the slide offset and the active indicator for the current slide.
/// Safe to repeat.
pub fn render_position(carousel: &Carousel, surface: &dyn Surface) {
    render(
        surface,
        Update::SlideOffset {
            percent: carousel.offset_percent(),
        },
    );
    render(
        surface,
        Update::ActiveIndicator {
            index: carousel.current_slide(),
        },
    );
}

/// Renders the startup state: arrows visible, first position shown.
pub fn render_initial(carousel: &Carousel, surface: &dyn Surface) {
    render(surface, Update::ArrowsVisible(true));
    render_position(carousel, surface);
}

/// Handles the `Navigate` command: steps the carousel and re-renders.
pub fn handle_navigate(
    command: &Navigate,
    carousel: &mut Carousel,
    clock: &dyn Clock,
    surface: &dyn Surface,
) -> Vec<NavigationEvent> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        direction = ?command.direction,
        "handling navigate command"
    );

    carousel.navigate(command.direction, command.correlation_id, clock);
    render_position(carousel, surface);
    carousel.take_uncommitted_events()
}

/// Handles the `Swipe` command: a long enough swipe becomes one navigation
/// step; anything shorter is ignored.
pub fn handle_swipe(
    command: &Swipe,
    carousel: &mut Carousel,
    clock: &dyn Clock,
    surface: &dyn Surface,
) -> Vec<NavigationEvent> {
    let Some(direction) = command.direction() else {
        debug!(
            start_x = command.start_x,
            end_x = command.end_x,
            "swipe below threshold ignored"
        );
        return Vec::new();
    };

    let navigate = Navigate {
        correlation_id: command.correlation_id(),
        direction,
    };
    handle_navigate(&navigate, carousel, clock, surface)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use memory_lane_core::surface::{BindingPoint, Update};
    use memory_lane_test_support::{FixedClock, RecordingSurface};
    use uuid::Uuid;

    use super::*;
    use crate::domain::commands::Direction;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn navigate(direction: Direction) -> Navigate {
        Navigate {
            correlation_id: Uuid::new_v4(),
            direction,
        }
    }

    #[test]
    fn test_handle_navigate_renders_offset_and_indicator() {
        // Arrange
        let mut carousel = Carousel::new(3);
        let surface = RecordingSurface::new();

        // Act
        let events = handle_navigate(&navigate(Direction::Previous), &mut carousel, &clock(), &surface);

        // Assert
        assert_eq!(events.len(), 1);
        assert!(carousel.uncommitted_events().is_empty());
        assert_eq!(surface.active_indicator(), Some(2));
        let offset = surface.slide_offset().unwrap();
        assert!((offset - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_position_is_idempotent() {
        // Arrange
        let carousel = Carousel::new(3);
        let surface = RecordingSurface::new();

        // Act
        render_position(&carousel, &surface);
        let first = surface.updates();
        surface.clear();
        render_position(&carousel, &surface);

        // Assert
        assert_eq!(surface.updates(), first);
    }

    #[test]
    fn test_render_initial_shows_arrows() {
        let carousel = Carousel::new(3);
        let surface = RecordingSurface::new();

        render_initial(&carousel, &surface);

        assert_eq!(surface.count(|u| *u == Update::ArrowsVisible(true)), 1);
        assert_eq!(surface.active_indicator(), Some(0));
    }

    #[test]
    fn test_navigate_without_wrapper_still_moves_and_marks_indicator() {
        // Arrange
        let mut carousel = Carousel::new(3);
        let surface = RecordingSurface::without(&[BindingPoint::SlidesWrapper]);

        // Act
        handle_navigate(&navigate(Direction::Next), &mut carousel, &clock(), &surface);

        // Assert
        assert_eq!(carousel.current_slide(), 1);
        assert_eq!(surface.slide_offset(), None);
        assert_eq!(surface.active_indicator(), Some(1));
    }

    #[test]
    fn test_handle_swipe_steps_once_past_threshold() {
        // Arrange
        let mut carousel = Carousel::new(3);
        let surface = RecordingSurface::new();
        let swipe = Swipe {
            correlation_id: Uuid::new_v4(),
            start_x: 400.0,
            end_x: 120.0,
        };

        // Act
        let events = handle_swipe(&swipe, &mut carousel, &clock(), &surface);

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(carousel.current_slide(), 1);
    }

    #[test]
    fn test_handle_swipe_ignores_short_touch() {
        // Arrange
        let mut carousel = Carousel::new(3);
        let surface = RecordingSurface::new();
        let swipe = Swipe {
            correlation_id: Uuid::new_v4(),
            start_x: 100.0,
            end_x: 140.0,
        };

        // Act
        let events = handle_swipe(&swipe, &mut carousel, &clock(), &surface);

        // Assert
        assert!(events.is_empty());
        assert_eq!(carousel.current_slide(), 0);
        assert!(surface.updates().is_empty());
    }
}
