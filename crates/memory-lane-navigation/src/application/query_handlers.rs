//! Query handlers for the navigation context.

use serde::Serialize;

use crate::domain::aggregates::Carousel;

/// Read-only view of the carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView {
    /// The active slide.
    pub current_slide: usize,
    /// Number of slides.
    pub slide_count: usize,
    /// Wrapper offset in percent.
    pub offset_percent: f64,
}

/// Returns the current carousel view.
#[must_use]
pub fn get_carousel_view(carousel: &Carousel) -> CarouselView {
    CarouselView {
        current_slide: carousel.current_slide(),
        slide_count: carousel.slide_count(),
        offset_percent: carousel.offset_percent(),
    }
}
