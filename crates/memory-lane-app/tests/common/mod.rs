//! Shared test helpers for session integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use memory_lane_app::input::{Input, parse_line};
use memory_lane_app::session::{Flow, GameSession};
use memory_lane_content::StoryContent;
use memory_lane_intro::domain::aggregates::IntroTiming;
use memory_lane_persistence::keys::{INTRO_PLAYED_KEY, PROGRESS_KEY};
use memory_lane_test_support::{InMemoryKeyValueStore, ManualClock, RecordingSurface};

/// The three answers of the built-in story, in slide order.
pub const ANSWERS: [&str; 3] = ["2163", "180", "超大優惠"];

/// A session wired to recording fakes that the test keeps handles to.
pub struct Harness {
    pub session: GameSession,
    pub surface: Arc<RecordingSurface>,
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryKeyValueStore>,
}

/// Builds an unstarted session over the built-in story and `store`.
pub fn build_session(store: Arc<InMemoryKeyValueStore>) -> Harness {
    build_session_with_surface(store, RecordingSurface::new())
}

/// Builds an unstarted session rendering into `surface`.
pub fn build_session_with_surface(
    store: Arc<InMemoryKeyValueStore>,
    surface: RecordingSurface,
) -> Harness {
    let clock = Arc::new(ManualClock::at_epoch());
    let surface = Arc::new(surface);
    let session = GameSession::new(
        StoryContent::builtin().unwrap(),
        IntroTiming::default(),
        clock.clone(),
        store.clone(),
        surface.clone(),
    );
    Harness {
        session,
        surface,
        clock,
        store,
    }
}

/// A store for a returning player: intro already played.
pub fn returning_player() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::with_entry(INTRO_PLAYED_KEY, "true"))
}

/// A returning player's store holding `progress` as the raw payload.
pub fn returning_player_with_progress(progress: &str) -> Arc<InMemoryKeyValueStore> {
    let store = returning_player();
    store.seed(PROGRESS_KEY, progress);
    store
}

/// Builds and starts a session for a returning player with no progress.
pub async fn started() -> Harness {
    let mut harness = build_session(returning_player());
    harness.session.start(false).await.unwrap();
    harness
}

/// Feeds one input line to the session.
pub async fn send(harness: &mut Harness, line: &str) -> Flow {
    let input: Input = parse_line(line).unwrap().unwrap();
    harness.session.handle(input).await
}

/// Opens and answers every puzzle correctly.
pub async fn solve_all(harness: &mut Harness) {
    for (index, answer) in ANSWERS.iter().enumerate() {
        send(harness, &format!("solve {}", index + 1)).await;
        send(harness, &format!("answer {answer}")).await;
    }
}
