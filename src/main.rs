//! Brick Breaker entry point
//!
//! Loads settings, builds the game state and runs the frame loop in the
//! terminal. Usage: `brick-breaker [settings.json]`

use std::io::{BufWriter, stdout};
use std::path::PathBuf;

use anyhow::Context;

use brick_breaker::Settings;
use brick_breaker::frame_loop::FrameLoop;
use brick_breaker::platform::terminal::{self, TerminalInput, TerminalPresentation};
use brick_breaker::sim::GameState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Brick Breaker starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::DEFAULT_PATH));
    let settings = Settings::load(&settings_path);

    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    let mut state = GameState::new(settings.level_catalog(), seed)
        .context("failed to load the first level")?;
    log::info!("Game initialized with seed: {}", seed);

    let mut out = BufWriter::new(stdout());
    let keyboard_enhanced = terminal::enter(&mut out).context("failed to set up the terminal")?;

    let mut frame_loop = FrameLoop::from_settings(&settings);
    let mut input = TerminalInput::new();
    let result = {
        let mut presentation = TerminalPresentation::new(&mut out, settings.mixer());
        frame_loop.run(&mut state, &mut presentation, &mut input)
    };

    // Restore the terminal before any error is printed
    terminal::leave(&mut out, keyboard_enhanced);
    result.context("game loop failed")?;

    println!("Final score: {}", state.player.score);
    Ok(())
}
