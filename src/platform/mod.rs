//! Platform abstraction layer
//!
//! The simulation never touches a window, speaker or keyboard. It talks to:
//! - an [`InputSource`] polled once per frame for discrete signals
//! - a [`Presentation`] that draws frames, plays sounds and shows pauses
//!
//! `terminal` implements both on top of crossterm.

pub mod terminal;

use std::io;

use crate::audio::SoundEffect;
use crate::sim::GameState;

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSignal {
    Quit,
    /// Held paddle movement, reported every frame the key is down
    MoveLeft,
    MoveRight,
    /// Remove every brick (debug/testing)
    DebugClearBricks,
    /// Dismiss the current pause
    Continue,
}

/// Source of player input
pub trait InputSource {
    /// Signals since the last poll. Must not block.
    fn poll(&mut self) -> io::Result<Vec<InputSignal>>;
}

/// Drawing and sound output
pub trait Presentation {
    /// Draw the play field and HUD
    fn draw_frame(&mut self, state: &GameState) -> io::Result<()>;

    /// Play a sound. Failures must be swallowed: gameplay never depends on audio.
    fn play_sound(&mut self, effect: SoundEffect);

    /// Show a pause message over the last frame (or a blank field)
    fn show_pause(&mut self, main_text: &str, sub_text: &str, hide_gameplay: bool) -> io::Result<()>;
}
