//! Memory Lane terminal front-end entry point.

use std::error::Error;
use std::pin::pin;
use std::sync::Arc;

use memory_lane_app::config::AppConfig;
use memory_lane_app::error::AppError;
use memory_lane_app::input::parse_line;
use memory_lane_app::session::{Flow, GameSession};
use memory_lane_app::sleeper::TokioSleeper;
use memory_lane_app::terminal::TerminalSurface;
use memory_lane_content::StoryContent;
use memory_lane_core::clock::{Clock, SystemClock};
use memory_lane_core::sleeper::Sleeper;
use memory_lane_core::surface::Surface;
use memory_lane_intro::application::command_handlers::play_intro;
use memory_lane_intro::domain::aggregates::IntroTiming;
use memory_lane_persistence::json_file_store::JsonFileStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; stdout belongs to the game.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Memory Lane");

    let config = AppConfig::from_env()?;
    let story = match &config.content_path {
        Some(path) => StoryContent::load(path).map_err(AppError::from)?,
        None => StoryContent::builtin().map_err(AppError::from)?,
    };

    let clock = Arc::new(SystemClock);
    let store = Arc::new(JsonFileStore::open(config.state_path.clone()).await);
    let surface = Arc::new(TerminalSurface::stdout());
    let sleeper = TokioSleeper;

    let mut session = GameSession::new(
        story,
        IntroTiming::default(),
        Arc::clone(&clock) as Arc<dyn Clock>,
        store,
        Arc::clone(&surface) as Arc<dyn Surface>,
    );
    session.start(config.skip_intro).await?;

    // The intro plays alongside input handling; its sequencer goes back to
    // the session once the entry control is shown.
    let intro = session.take_intro();
    let (sleeper_ref, clock_ref, surface_ref): (&dyn Sleeper, &dyn Clock, &dyn Surface) =
        (&sleeper, &*clock, &*surface);
    let mut playback = pin!(async move {
        match intro {
            Some(intro) => Some(play_intro(intro, sleeper_ref, clock_ref, surface_ref).await),
            None => None,
        }
    });
    let mut playing = true;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick);

    loop {
        tokio::select! {
            finished = &mut playback, if playing => {
                playing = false;
                if let Some(intro) = finished {
                    session.resume_intro(intro);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.map_err(AppError::from)? else {
                    break;
                };
                let input = match parse_line(&line) {
                    Ok(Some(input)) => input,
                    Ok(None) => continue,
                    Err(err) => {
                        surface.print_line(&format!("! {err}"))?;
                        continue;
                    }
                };
                match session.handle(input).await {
                    Flow::Continue => {}
                    Flow::Show(view) => surface.print_line(&serde_json::to_string_pretty(&view)?)?,
                    Flow::Rejected(err) => surface.print_line(&format!("! {err}"))?,
                    Flow::Quit => break,
                }
            }
            _ = ticker.tick() => {
                session.fire_due_timers();
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    tracing::info!("Memory Lane stopped");
    Ok(())
}
