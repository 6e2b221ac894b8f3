//! Integration tests for the game session.

mod common;

use std::sync::Arc;

use memory_lane_app::session::Flow;
use memory_lane_core::error::DomainError;
use memory_lane_core::surface::{BindingPoint, Overlay, Update};
use memory_lane_intro::application::command_handlers::play_intro;
use memory_lane_intro::domain::aggregates::IntroPhase;
use memory_lane_overlay::domain::hotspots::{HotspotId, Scene};
use memory_lane_persistence::keys::{INTRO_PLAYED_KEY, PROGRESS_KEY};
use memory_lane_test_support::{InMemoryKeyValueStore, RecordingSleeper, RecordingSurface};

use common::{Harness, build_session, build_session_with_surface, send, solve_all, started};

#[tokio::test]
async fn test_start_shows_arrows_and_first_slide() {
    let harness = started().await;

    assert_eq!(
        harness.surface.updates()[..3],
        [
            Update::ArrowsVisible(true),
            Update::SlideOffset { percent: 0.0 },
            Update::ActiveIndicator { index: 0 },
        ]
    );
    assert!(harness.session.hotspots().len() >= 6);
}

#[tokio::test]
async fn test_arrows_and_swipes_wrap_around() {
    // Arrange
    let mut harness = started().await;

    // Act / Assert
    send(&mut harness, "prev").await;
    assert_eq!(harness.surface.active_indicator(), Some(2));

    send(&mut harness, "next").await;
    assert_eq!(harness.surface.active_indicator(), Some(0));

    send(&mut harness, "swipe 300 200").await;
    assert_eq!(harness.surface.active_indicator(), Some(1));

    send(&mut harness, "swipe 200 240").await;
    assert_eq!(harness.surface.active_indicator(), Some(1));

    send(&mut harness, "swipe 100 200").await;
    assert_eq!(harness.surface.active_indicator(), Some(0));
}

#[tokio::test]
async fn test_wrong_then_right_answer() {
    // Arrange
    let mut harness = started().await;
    send(&mut harness, "solve 1").await;

    // Act
    send(&mut harness, "answer 2164").await;
    let solved_after_wrong = harness.session.board().is_solved(0);
    send(&mut harness, "answer  2163 ").await;

    // Assert
    assert!(!solved_after_wrong);
    assert!(harness.session.board().is_solved(0));
    assert!(harness.surface.solved_buttons().contains(&0));
    assert!(harness.surface.is_visible(Overlay::Solution));
    assert_eq!(
        harness.store.raw(PROGRESS_KEY).as_deref(),
        Some(r#"{"solvedPuzzles":[true,false,false],"finalUrlShown":false}"#)
    );
}

#[tokio::test]
async fn test_answer_after_closing_prompt_is_rejected() {
    for (slide, dismiss, answer) in [(1, "close puzzle", "2163"), (2, "bg puzzle", "180")] {
        // Arrange
        let mut harness = started().await;
        send(&mut harness, &format!("solve {slide}")).await;
        send(&mut harness, dismiss).await;

        // Act
        let flow = send(&mut harness, &format!("answer {answer}")).await;

        // Assert
        assert!(!harness.surface.is_visible(Overlay::Puzzle));
        assert!(matches!(flow, Flow::Rejected(DomainError::Validation(_))));
        assert!(!harness.session.board().is_solved(slide - 1));
        assert_eq!(harness.store.raw(PROGRESS_KEY), None);
    }
}

#[tokio::test]
async fn test_two_solved_never_schedules_finale() {
    let mut harness = started().await;

    for (index, answer) in ["2163", "180"].into_iter().enumerate() {
        send(&mut harness, &format!("solve {}", index + 1)).await;
        send(&mut harness, &format!("answer {answer}")).await;
    }
    harness.clock.advance_millis(5000);

    assert_eq!(harness.session.fire_due_timers(), 0);
    assert!(!harness.session.board().finale_unlocked());
    assert!(!harness.surface.is_visible(Overlay::Final));
}

#[tokio::test]
async fn test_finale_appears_exactly_at_reveal_delay() {
    // Arrange
    let mut harness = started().await;
    solve_all(&mut harness).await;

    // Act / Assert
    harness.clock.advance_millis(999);
    assert_eq!(harness.session.fire_due_timers(), 0);
    assert!(!harness.surface.is_visible(Overlay::Final));

    harness.clock.advance_millis(1);
    assert_eq!(harness.session.fire_due_timers(), 1);
    assert!(harness.surface.is_visible(Overlay::Final));
    assert_eq!(
        harness.store.raw(PROGRESS_KEY).as_deref(),
        Some(r#"{"solvedPuzzles":[true,true,true],"finalUrlShown":true}"#)
    );
}

#[tokio::test]
async fn test_resubmitting_after_completion_schedules_nothing_new() {
    // Arrange
    let mut harness = started().await;
    solve_all(&mut harness).await;
    harness.clock.advance_millis(1000);
    harness.session.fire_due_timers();

    // Act
    let flow = send(&mut harness, "solve 3").await;
    let answer = send(&mut harness, "answer 超大優惠").await;
    harness.clock.advance_millis(10_000);

    // Assert
    assert!(matches!(flow, Flow::Continue));
    assert!(matches!(answer, Flow::Rejected(DomainError::Validation(_))));
    assert_eq!(harness.session.fire_due_timers(), 0);
}

#[tokio::test]
async fn test_reload_restores_buttons_and_reshows_finale() {
    // Arrange
    let store = common::returning_player_with_progress(
        r#"{"solvedPuzzles":[true,true,true],"finalUrlShown":true}"#,
    );
    let mut harness = build_session(store);

    // Act
    harness.session.start(false).await.unwrap();

    // Assert
    assert_eq!(
        harness.surface.solved_buttons().into_iter().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    harness.clock.advance_millis(499);
    assert_eq!(harness.session.fire_due_timers(), 0);
    harness.clock.advance_millis(1);
    assert_eq!(harness.session.fire_due_timers(), 1);
    assert!(harness.surface.is_visible(Overlay::Final));
}

#[tokio::test]
async fn test_progress_survives_a_new_session_over_the_same_store() {
    // Arrange
    let mut first = started().await;
    send(&mut first, "solve 2").await;
    send(&mut first, "answer 180").await;

    // Act
    let mut second = build_session(Arc::clone(&first.store));
    second.session.start(false).await.unwrap();

    // Assert
    assert_eq!(second.session.board().solved(), &[false, true, false]);
    assert_eq!(second.session.fire_due_timers(), 0);
}

#[tokio::test]
async fn test_malformed_progress_starts_fresh() {
    for payload in [
        "not json",
        r#"{"solvedPuzzles":[true,true]}"#,
        r#"{"solved":[true,true,true]}"#,
    ] {
        // Arrange
        let store = common::returning_player_with_progress(payload);
        let mut harness = build_session(store);

        // Act
        harness.session.start(false).await.unwrap();

        // Assert
        assert_eq!(harness.session.board().solved(), &[false, false, false]);
        assert!(harness.surface.solved_buttons().is_empty());
    }
}

#[tokio::test]
async fn test_grand_finale_rebinds_finale_hotspots() {
    // Arrange
    let mut harness = started().await;
    let before = send(&mut harness, "finale").await;
    solve_all(&mut harness).await;

    // Act
    send(&mut harness, "finale").await;
    send(&mut harness, "close grand_finale").await;
    send(&mut harness, "finale").await;
    send(&mut harness, "hotspot finale-veil").await;

    // Assert
    assert!(matches!(before, Flow::Rejected(DomainError::Validation(_))));
    assert_eq!(harness.session.hotspots().bound_in(Scene::Finale).len(), 3);
    assert!(harness.surface.is_visible(Overlay::GrandFinale));
    assert!(harness.surface.is_visible(Overlay::Info));
    assert_eq!(harness.surface.clue_image(), Some(None));
    assert!(
        harness
            .session
            .hotspots()
            .get(&HotspotId::new("finale-veil"))
            .is_some()
    );
}

#[tokio::test]
async fn test_finale_hotspot_before_finale_is_ignored() {
    let mut harness = started().await;
    harness.surface.clear();

    let flow = send(&mut harness, "hotspot finale-door").await;

    assert!(matches!(flow, Flow::Continue));
    assert!(harness.surface.updates().is_empty());
}

#[tokio::test]
async fn test_slide_hotspot_shows_info_and_background_closes_it() {
    // Arrange
    let mut harness = started().await;

    // Act
    send(&mut harness, "hotspot carousel-photo").await;
    let opened = harness.surface.is_visible(Overlay::Info);
    send(&mut harness, "bg info").await;

    // Assert
    assert!(opened);
    assert!(!harness.surface.is_visible(Overlay::Info));
    assert_eq!(
        harness.surface.clue_image(),
        Some(Some("images/clue-carousel.png".to_owned()))
    );
}

#[tokio::test]
async fn test_first_visit_plays_intro_then_enters() {
    // Arrange
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut harness = build_session(store);
    harness.session.start(false).await.unwrap();
    let intro = harness.session.take_intro().unwrap();
    let sleeper = RecordingSleeper::new();

    // Act
    let early = send(&mut harness, "begin").await;
    let intro = play_intro(intro, &sleeper, &*harness.clock, &*harness.surface).await;
    harness.session.resume_intro(intro);
    let entered = send(&mut harness, "begin").await;

    // Assert
    assert!(matches!(early, Flow::Rejected(DomainError::Validation(_))));
    assert!(matches!(entered, Flow::Continue));
    let typed = harness.surface.typed_text();
    assert!(typed.starts_with("婚禮前一夜，\n"));
    assert!(typed.contains("請各位將這三段回憶重新點亮吧！不然她要趕不上婚禮了。"));
    assert_eq!(harness.store.raw(INTRO_PLAYED_KEY).as_deref(), Some("true"));
    assert_eq!(harness.surface.count(|u| *u == Update::IntroOverlayHidden), 1);

    harness.clock.advance_millis(1499);
    assert_eq!(harness.session.fire_due_timers(), 0);
    harness.clock.advance_millis(1);
    assert_eq!(harness.session.fire_due_timers(), 1);
    assert_eq!(harness.surface.count(|u| *u == Update::IntroOverlayRemoved), 1);
}

#[tokio::test]
async fn test_returning_player_skips_intro() {
    let harness = started().await;

    assert!(harness.surface.typed_text().is_empty());
    assert_eq!(harness.surface.count(|u| *u == Update::IntroOverlayHidden), 1);
    assert_eq!(
        harness.session.view().intro.map(|view| view.phase),
        Some(IntroPhase::Dismissed)
    );
}

#[tokio::test]
async fn test_missing_intro_targets_disable_intro() {
    let mut harness = build_session_with_surface(
        Arc::new(InMemoryKeyValueStore::new()),
        RecordingSurface::without(&[BindingPoint::IntroOverlay]),
    );

    harness.session.start(false).await.unwrap();

    assert_eq!(
        harness.session.view().intro.map(|view| view.phase),
        Some(IntroPhase::Idle)
    );
    assert_eq!(harness.surface.count(|u| matches!(u, Update::PageScrollLocked(_))), 0);
}

#[tokio::test]
async fn test_state_and_quit() {
    let mut harness = started().await;
    send(&mut harness, "next").await;

    let state = send(&mut harness, "state").await;
    let quit = send(&mut harness, "quit").await;

    let Flow::Show(view) = state else {
        panic!("expected a view, got {state:?}");
    };
    assert_eq!(view.carousel.current_slide, 1);
    assert_eq!(view.progress.solved_count, 0);
    assert!(matches!(quit, Flow::Quit));
}

#[tokio::test]
async fn test_solve_out_of_range_is_rejected() {
    let mut harness = started().await;

    let flow = send(&mut harness, "solve 4").await;

    assert!(matches!(flow, Flow::Rejected(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_harness_store_is_shared() {
    let Harness { store, .. } = started().await;

    assert_eq!(store.raw(PROGRESS_KEY), None);
}
