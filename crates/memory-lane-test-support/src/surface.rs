//! Test surface — records every render update.

use std::collections::BTreeSet;
use std::sync::Mutex;

use memory_lane_core::error::DomainError;
use memory_lane_core::surface::{BindingPoint, Overlay, Surface, Update};

/// A surface that records every applied update. Binding points can be
/// removed to exercise the "missing target" paths; updates aimed at a
/// missing point are rejected and not recorded.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    missing: BTreeSet<BindingPoint>,
    updates: Mutex<Vec<Update>>,
}

impl RecordingSurface {
    /// Creates a surface where every binding point exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface lacking the given binding points.
    #[must_use]
    pub fn without(points: &[BindingPoint]) -> Self {
        Self {
            missing: points.iter().copied().collect(),
            updates: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all applied updates.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn updates(&self) -> Vec<Update> {
        self.updates.lock().unwrap().clone()
    }

    /// Forgets every recorded update.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.updates.lock().unwrap().clear();
    }

    /// Returns whether `overlay` is currently presented, judging by the last
    /// visibility update it received.
    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.updates()
            .iter()
            .rev()
            .find_map(|update| match update {
                Update::OverlayVisible {
                    overlay: target,
                    visible,
                } if *target == overlay => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Returns the typed-text buffer, with line breaks as `\n`.
    pub fn typed_text(&self) -> String {
        self.updates()
            .iter()
            .filter_map(|update| match update {
                Update::TypedChar(c) => Some(*c),
                Update::TypedLineBreak => Some('\n'),
                _ => None,
            })
            .collect()
    }

    /// Returns the indices of solve buttons switched to their solved label.
    pub fn solved_buttons(&self) -> BTreeSet<usize> {
        self.updates()
            .iter()
            .filter_map(|update| match update {
                Update::SolveButtonSolved { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Returns the last active indicator.
    pub fn active_indicator(&self) -> Option<usize> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::ActiveIndicator { index } => Some(*index),
            _ => None,
        })
    }

    /// Returns the last slide offset.
    pub fn slide_offset(&self) -> Option<f64> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::SlideOffset { percent } => Some(*percent),
            _ => None,
        })
    }

    /// Returns the last value written to the wrong-answer hint.
    pub fn hint_visible(&self) -> Option<bool> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::HintVisible(visible) => Some(*visible),
            _ => None,
        })
    }

    /// Returns the last info HTML.
    pub fn info_html(&self) -> Option<String> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::InfoText { html } => Some(html.clone()),
            _ => None,
        })
    }

    /// Returns the last image written to the clue slot. The outer `Option` is
    /// `None` when the slot was never written.
    pub fn clue_image(&self) -> Option<Option<String>> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::ClueImage { src, .. } => Some(src.clone()),
            _ => None,
        })
    }

    /// Returns the last solution text.
    pub fn solution_text(&self) -> Option<String> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::SolutionText { text } => Some(text.clone()),
            _ => None,
        })
    }

    /// Returns the last puzzle question.
    pub fn puzzle_question(&self) -> Option<String> {
        self.updates().iter().rev().find_map(|update| match update {
            Update::PuzzleQuestion { text } => Some(text.clone()),
            _ => None,
        })
    }

    /// Returns how many recorded updates match `predicate`.
    pub fn count(&self, predicate: impl Fn(&Update) -> bool) -> usize {
        self.updates().iter().filter(|update| predicate(update)).count()
    }
}

impl Surface for RecordingSurface {
    fn has_binding(&self, point: BindingPoint) -> bool {
        !self.missing.contains(&point)
    }

    fn apply(&self, update: &Update) -> Result<(), DomainError> {
        let point = update.binding_point();
        if !self.has_binding(point) {
            return Err(DomainError::MissingBinding(point.to_string()));
        }
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }
}
