//! Render binding points.
//!
//! The presentation layer owns a set of named render targets. Contexts never
//! touch those targets directly: they describe each change as an [`Update`]
//! and hand it to a [`Surface`]. A surface that lacks the target returns
//! `DomainError::MissingBinding`, which [`render`] logs and skips.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DomainError;

/// Overlays shown above the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    /// Hotspot info panel.
    Info,
    /// Answer input prompt.
    Puzzle,
    /// Solved-puzzle narrative.
    Solution,
    /// "All memories restored" modal with the finale entry control.
    Final,
    /// The finale scene with its own hotspots.
    GrandFinale,
}

impl Overlay {
    /// Every overlay, in render order.
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Puzzle,
        Self::Solution,
        Self::Final,
        Self::GrandFinale,
    ];

    /// Stable short name, as used by input commands and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Puzzle => "puzzle",
            Self::Solution => "solution",
            Self::Final => "final",
            Self::GrandFinale => "grand_finale",
        }
    }

    /// Looks an overlay up by its short name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|overlay| overlay.name() == name)
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named render target owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingPoint {
    /// The element translated to show the active slide.
    SlidesWrapper,
    /// The row of position indicator dots.
    Indicators,
    /// Left and right navigation arrows.
    Arrows,
    /// The solve button of one slide.
    SolveButton(usize),
    /// The container of one overlay.
    Overlay(Overlay),
    /// Rich-text area of the info overlay.
    InfoText,
    /// Image slot of the info overlay.
    ClueImage,
    /// Question line of the puzzle overlay.
    PuzzleQuestion,
    /// Answer text input.
    AnswerInput,
    /// Wrong-answer hint.
    HintMessage,
    /// Text area of the solution overlay.
    SolutionText,
    /// Intro typed-text accumulation buffer.
    TypingText,
    /// Blinking intro cursor.
    Cursor,
    /// Intro entry control.
    EnterButton,
    /// Full-screen intro overlay.
    IntroOverlay,
    /// Page-level scrolling.
    Page,
}

impl fmt::Display for BindingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlidesWrapper => f.write_str("slides_wrapper"),
            Self::Indicators => f.write_str("indicators"),
            Self::Arrows => f.write_str("arrows"),
            Self::SolveButton(index) => write!(f, "solve_button[{index}]"),
            Self::Overlay(overlay) => write!(f, "overlay[{overlay}]"),
            Self::InfoText => f.write_str("info_text"),
            Self::ClueImage => f.write_str("clue_image"),
            Self::PuzzleQuestion => f.write_str("puzzle_question"),
            Self::AnswerInput => f.write_str("answer_input"),
            Self::HintMessage => f.write_str("hint_message"),
            Self::SolutionText => f.write_str("solution_text"),
            Self::TypingText => f.write_str("typing_text"),
            Self::Cursor => f.write_str("cursor"),
            Self::EnterButton => f.write_str("enter_button"),
            Self::IntroOverlay => f.write_str("intro_overlay"),
            Self::Page => f.write_str("page"),
        }
    }
}

/// A single change written to a binding point.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Translate the slides wrapper left by `percent` of its width.
    SlideOffset {
        /// Offset in percent, `0.0` for the first slide.
        percent: f64,
    },
    /// Mark indicator `index` active and clear all others.
    ActiveIndicator {
        /// The active slide.
        index: usize,
    },
    /// Show or hide both navigation arrows.
    ArrowsVisible(bool),
    /// Switch a solve button to its solved affordance.
    SolveButtonSolved {
        /// The slide the button belongs to.
        index: usize,
        /// The label shown once solved.
        label: String,
    },
    /// Show or hide an overlay.
    OverlayVisible {
        /// The overlay.
        overlay: Overlay,
        /// Whether it is presented.
        visible: bool,
    },
    /// Replace the info overlay's rich text.
    InfoText {
        /// Rendered HTML.
        html: String,
    },
    /// Replace the info overlay's image. `None` clears it.
    ClueImage {
        /// Image reference, if any.
        src: Option<String>,
        /// Alternative text for the image.
        alt: String,
    },
    /// Replace the puzzle overlay's question.
    PuzzleQuestion {
        /// Plain question text.
        text: String,
    },
    /// Clear the answer input and focus it.
    AnswerInputReset,
    /// Show or hide the wrong-answer hint.
    HintVisible(bool),
    /// Replace the solution overlay's text.
    SolutionText {
        /// Plain narrative text.
        text: String,
    },
    /// Append one character to the typed-text buffer.
    TypedChar(char),
    /// Append a line break to the typed-text buffer.
    TypedLineBreak,
    /// Set the typed-text opacity.
    TypingTextOpacity(f32),
    /// Set the cursor opacity.
    CursorOpacity(f32),
    /// Show the intro entry control at full opacity.
    EntryButtonVisible,
    /// Start the intro overlay's hide transition.
    IntroOverlayHidden,
    /// Take the intro overlay out of the render tree.
    IntroOverlayRemoved,
    /// Lock or restore page scrolling.
    PageScrollLocked(bool),
}

impl Update {
    /// The binding point this update writes to.
    #[must_use]
    pub fn binding_point(&self) -> BindingPoint {
        match self {
            Self::SlideOffset { .. } => BindingPoint::SlidesWrapper,
            Self::ActiveIndicator { .. } => BindingPoint::Indicators,
            Self::ArrowsVisible(_) => BindingPoint::Arrows,
            Self::SolveButtonSolved { index, .. } => BindingPoint::SolveButton(*index),
            Self::OverlayVisible { overlay, .. } => BindingPoint::Overlay(*overlay),
            Self::InfoText { .. } => BindingPoint::InfoText,
            Self::ClueImage { .. } => BindingPoint::ClueImage,
            Self::PuzzleQuestion { .. } => BindingPoint::PuzzleQuestion,
            Self::AnswerInputReset => BindingPoint::AnswerInput,
            Self::HintVisible(_) => BindingPoint::HintMessage,
            Self::SolutionText { .. } => BindingPoint::SolutionText,
            Self::TypedChar(_) | Self::TypedLineBreak | Self::TypingTextOpacity(_) => {
                BindingPoint::TypingText
            }
            Self::CursorOpacity(_) => BindingPoint::Cursor,
            Self::EntryButtonVisible => BindingPoint::EnterButton,
            Self::IntroOverlayHidden | Self::IntroOverlayRemoved => BindingPoint::IntroOverlay,
            Self::PageScrollLocked(_) => BindingPoint::Page,
        }
    }
}

/// The presentation layer as seen from the contexts.
pub trait Surface: Send + Sync {
    /// Returns whether the named target currently exists.
    fn has_binding(&self, point: BindingPoint) -> bool;

    /// Writes `update` to its binding point.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingBinding` if the target does not exist.
    fn apply(&self, update: &Update) -> Result<(), DomainError>;
}

/// Writes `update` to `surface`, skipping it if the target is missing.
pub fn render(surface: &dyn Surface, update: Update) {
    if let Err(err) = surface.apply(&update) {
        debug!(binding = %update.binding_point(), error = %err, "render step skipped");
    }
}
