//! Startup configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_STATE_PATH: &str = "memory-lane-state.json";
const DEFAULT_TICK_MS: u64 = 50;

/// Settings of one run of the terminal front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// File backing the key-value store.
    pub state_path: PathBuf,
    /// Story file; the built-in story when `None`.
    pub content_path: Option<PathBuf>,
    /// Poll interval of the timer queue.
    pub tick: Duration,
    /// Treat the intro as already played for this run.
    pub skip_intro: bool,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let state_path = lookup("MEMORY_LANE_STATE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from);

        let content_path = lookup("MEMORY_LANE_CONTENT_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let tick_ms = match lookup("MEMORY_LANE_TICK_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("MEMORY_LANE_TICK_MS must be a whole number: {e}"))
            })?,
            None => DEFAULT_TICK_MS,
        };
        if tick_ms == 0 {
            return Err(AppError::Config(
                "MEMORY_LANE_TICK_MS must be positive".to_owned(),
            ));
        }

        let skip_intro = match lookup("MEMORY_LANE_SKIP_INTRO") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "MEMORY_LANE_SKIP_INTRO must be true or false, got {raw:?}"
                ))
            })?,
            None => false,
        };

        Ok(Self {
            state_path,
            content_path,
            tick: Duration::from_millis(tick_ms),
            skip_intro,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
