//! Line-oriented terminal rendering of surface updates.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use memory_lane_core::error::DomainError;
use memory_lane_core::surface::{BindingPoint, Surface, Update};

/// A `Surface` that writes every update as text. Intro characters are
/// streamed as they are typed; everything else is one tagged line.
#[derive(Debug)]
pub struct TerminalSurface<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl TerminalSurface<Stdout> {
    /// Creates a surface writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Creates a surface writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the writer lock is poisoned.
    pub fn into_inner(self) -> Result<W, DomainError> {
        self.out
            .into_inner()
            .map_err(|_| DomainError::Infrastructure("terminal writer lock poisoned".into()))
    }

    /// Writes a free-form line, outside of any binding point.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if writing fails.
    pub fn print_line(&self, line: &str) -> Result<(), DomainError> {
        let mut out = self.lock()?;
        writeln!(out, "{line}").map_err(write_failed)?;
        out.flush().map_err(write_failed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, W>, DomainError> {
        self.out
            .lock()
            .map_err(|_| DomainError::Infrastructure("terminal writer lock poisoned".into()))
    }
}

fn write_failed(err: io::Error) -> DomainError {
    DomainError::Infrastructure(format!("terminal write failed: {err}"))
}

fn shown(visible: bool) -> &'static str {
    if visible { "shown" } else { "hidden" }
}

fn describe(update: &Update) -> Option<String> {
    let line = match update {
        Update::SlideOffset { percent } => format!("[slides] offset -{percent:.2}%"),
        Update::ActiveIndicator { index } => format!("[indicators] slide {} active", index + 1),
        Update::ArrowsVisible(visible) => format!("[arrows] {}", shown(*visible)),
        Update::SolveButtonSolved { index, label } => format!("[solve {}] {label}", index + 1),
        Update::OverlayVisible { overlay, visible } => {
            format!("[{overlay}] {}", if *visible { "opened" } else { "closed" })
        }
        Update::InfoText { html } => format!("[info] {}", html.trim_end()),
        Update::ClueImage { src: Some(src), alt } => format!("[clue] {alt}: {src}"),
        Update::ClueImage { src: None, .. } => "[clue] none".to_owned(),
        Update::PuzzleQuestion { text } => format!("[puzzle] {text}"),
        Update::AnswerInputReset => "[answer] cleared".to_owned(),
        Update::HintVisible(visible) => format!("[hint] {}", shown(*visible)),
        Update::SolutionText { text } => format!("[solution] {text}"),
        Update::TypingTextOpacity(opacity) => format!("[intro] text opacity {opacity}"),
        Update::CursorOpacity(opacity) => format!("[intro] cursor opacity {opacity}"),
        Update::EntryButtonVisible => "[intro] type `begin` to enter".to_owned(),
        Update::IntroOverlayHidden => "[intro] dismissed".to_owned(),
        Update::IntroOverlayRemoved => "[intro] removed".to_owned(),
        Update::PageScrollLocked(locked) => {
            format!("[page] scroll {}", if *locked { "locked" } else { "unlocked" })
        }
        Update::TypedChar(_) | Update::TypedLineBreak => return None,
    };
    Some(line)
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn has_binding(&self, _point: BindingPoint) -> bool {
        true
    }

    fn apply(&self, update: &Update) -> Result<(), DomainError> {
        let mut out = self.lock()?;
        match update {
            Update::TypedChar(c) => write!(out, "{c}").map_err(write_failed)?,
            Update::TypedLineBreak => writeln!(out).map_err(write_failed)?,
            other => {
                if let Some(line) = describe(other) {
                    writeln!(out, "{line}").map_err(write_failed)?;
                }
            }
        }
        out.flush().map_err(write_failed)
    }
}
