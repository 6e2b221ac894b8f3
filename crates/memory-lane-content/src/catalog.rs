//! Story content types, loading and validation.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

const BUILTIN_STORY: &str = include_str!("../content/story.yaml");

/// Failures while loading story content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content file could not be read.
    #[error("content file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not valid YAML for the story schema.
    #[error("content parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The content parsed but breaks a structural rule.
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// A complete story.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryContent {
    /// Carousel slides, in display order. Each guards one puzzle.
    pub slides: Vec<SlideContent>,
    /// The scene unlocked once every puzzle is solved.
    #[serde(default)]
    pub finale: FinaleContent,
    /// The first-visit reveal script.
    pub intro: IntroContent,
    /// Fixed UI strings.
    #[serde(default)]
    pub labels: Labels,
}

/// One carousel slide.
#[derive(Debug, Clone, Deserialize)]
pub struct SlideContent {
    /// Short slide title.
    pub title: String,
    /// The puzzle guarding this slide.
    pub puzzle: PuzzleContent,
    /// Clickable regions on the slide.
    #[serde(default)]
    pub hotspots: Vec<HotspotContent>,
}

/// A text-answer puzzle.
#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleContent {
    /// Question shown in the answer prompt. Falls back to
    /// [`Labels::default_question`] when absent.
    #[serde(default)]
    pub question: Option<String>,
    /// Expected answer, compared after trimming and upper-casing.
    pub answer: String,
    /// Narrative revealed once solved.
    pub solution: String,
}

/// A clickable region showing contextual info.
#[derive(Debug, Clone, Deserialize)]
pub struct HotspotContent {
    /// Identifier, unique across the whole story.
    pub id: String,
    /// Rich text (Markdown with inline HTML).
    pub info: String,
    /// Optional clue image reference.
    #[serde(default)]
    pub clue_image: Option<String>,
}

/// The finale scene.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinaleContent {
    /// Clickable regions on the finale scene. They never show images.
    #[serde(default)]
    pub hotspots: Vec<HotspotContent>,
}

/// The first-visit reveal script.
#[derive(Debug, Clone, Deserialize)]
pub struct IntroContent {
    /// Lines typed in order. An empty line is a paragraph break.
    pub lines: Vec<String>,
}

/// Fixed UI strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Solve-button label once its puzzle is solved.
    pub solved_button: String,
    /// Prompt used when a puzzle has no question of its own.
    pub default_question: String,
    /// Alternative text of clue images.
    pub clue_image_alt: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            solved_button: "解答".to_owned(),
            default_question: "請輸入你找到的答案".to_owned(),
            clue_image_alt: "線索圖片".to_owned(),
        }
    }
}

impl StoryContent {
    /// Returns the story shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the embedded story fails to parse or
    /// validate.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_STORY)
    }

    /// Parses and validates a story from YAML.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed YAML and
    /// `ContentError::Invalid` for structural problems.
    pub fn from_yaml(source: &str) -> Result<Self, ContentError> {
        let story: Self = serde_yaml::from_str(source)?;
        story.validate()?;
        Ok(story)
    }

    /// Reads, parses and validates a story file.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the file cannot be read, otherwise the
    /// errors of [`StoryContent::from_yaml`].
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path)?;
        let story = Self::from_yaml(&source)?;
        info!(path = %path.display(), slides = story.slides.len(), "story loaded");
        Ok(story)
    }

    /// Returns the number of slides, which is also the number of puzzles.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Returns the prompt for puzzle `index`, falling back to the default
    /// question label.
    #[must_use]
    pub fn question_for(&self, index: usize) -> &str {
        self.slides
            .get(index)
            .and_then(|slide| slide.puzzle.question.as_deref())
            .unwrap_or(&self.labels.default_question)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.slides.is_empty() {
            return Err(ContentError::Invalid("story needs at least one slide".to_owned()));
        }

        for (index, slide) in self.slides.iter().enumerate() {
            if slide.puzzle.answer.trim().is_empty() {
                return Err(ContentError::Invalid(format!(
                    "slide {index} has an empty answer"
                )));
            }
        }

        let mut seen = BTreeSet::new();
        let all_hotspots = self
            .slides
            .iter()
            .flat_map(|slide| slide.hotspots.iter())
            .chain(self.finale.hotspots.iter());
        for hotspot in all_hotspots {
            if !seen.insert(hotspot.id.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate hotspot id: {}",
                    hotspot.id
                )));
            }
        }

        Ok(())
    }
}
