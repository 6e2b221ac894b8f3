//! Memory Lane — application error types.

use memory_lane_content::ContentError;
use thiserror::Error;

/// Startup and runtime errors for the terminal front-end.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The story content could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Reading from or writing to the terminal failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
