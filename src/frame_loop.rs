//! Frame loop driving the simulation
//!
//! Each frame: poll input, run as many fixed ticks as real time allows,
//! forward sounds and pauses to the presentation, then redraw. Ticks are
//! decoupled from the frame rate, so a slow terminal only drops frames.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::consts::MAX_SUBSTEPS;
use crate::level::LevelError;
use crate::platform::{InputSignal, InputSource, Presentation};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Errors that end the frame loop
#[derive(Debug, Error)]
pub enum FrameError {
    /// A level failed to load mid-game
    #[error(transparent)]
    Level(#[from] LevelError),
    /// Input or output failed
    #[error("platform I/O failed")]
    Io(#[from] std::io::Error),
}

/// Fixed timestep driver
#[derive(Debug, Clone)]
pub struct FrameLoop {
    sim_dt: f32,
    frame_budget: Duration,
    accumulator: f32,
    /// Input carried between frames until a tick consumes it
    input: TickInput,
}

impl FrameLoop {
    pub fn new(tick_rate: u32, frame_rate: u32) -> Self {
        Self {
            sim_dt: 1.0 / tick_rate.max(1) as f32,
            frame_budget: Duration::from_secs_f32(1.0 / frame_rate.max(1) as f32),
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_rate, settings.frame_rate)
    }

    /// Run one frame given this frame's input and the real time since the last one
    pub fn frame<P: Presentation + ?Sized>(
        &mut self,
        state: &mut GameState,
        presentation: &mut P,
        signals: &[InputSignal],
        elapsed: f32,
    ) -> Result<(), FrameError> {
        self.input.merge(signals);

        // Clamp long stalls (debugger, suspended terminal)
        self.accumulator += elapsed.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < MAX_SUBSTEPS {
            tick(state, &self.input, self.sim_dt)?;
            self.accumulator -= self.sim_dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        // Quit must not wait for the next whole tick
        if self.input.quit && state.running {
            tick(state, &self.input, self.sim_dt)?;
        }

        self.present(state, presentation)
    }

    /// Forward queued events, then draw if gameplay is visible
    fn present<P: Presentation + ?Sized>(
        &mut self,
        state: &mut GameState,
        presentation: &mut P,
    ) -> Result<(), FrameError> {
        if !state.running {
            return Ok(());
        }

        for event in state.take_events() {
            match event {
                GameEvent::Sound(effect) => presentation.play_sound(effect),
                GameEvent::Paused {
                    main_text,
                    sub_text,
                    hide_gameplay,
                    ..
                } => {
                    if !hide_gameplay {
                        presentation.draw_frame(state)?;
                    }
                    presentation.show_pause(&main_text, &sub_text, hide_gameplay)?;
                }
                // No cue for pickups; the new ball shows up in the next draw
                GameEvent::PowerupCollected(_) => {}
            }
        }

        // Paused screens stay up until the pause ends
        if !state.is_paused() {
            presentation.draw_frame(state)?;
        }

        Ok(())
    }

    /// Run until the game stops
    pub fn run<P, I>(
        &mut self,
        state: &mut GameState,
        presentation: &mut P,
        input: &mut I,
    ) -> Result<(), FrameError>
    where
        P: Presentation + ?Sized,
        I: InputSource + ?Sized,
    {
        log::info!(
            "Frame loop starting: tick {:.4}s, frame budget {:?}",
            self.sim_dt,
            self.frame_budget
        );

        let mut last = Instant::now();
        while state.running {
            let frame_start = Instant::now();
            let elapsed = frame_start.duration_since(last).as_secs_f32();
            last = frame_start;

            let signals = input.poll()?;
            self.frame(state, presentation, &signals, elapsed)?;

            let spent = frame_start.elapsed();
            if spent < self.frame_budget {
                std::thread::sleep(self.frame_budget - spent);
            }
        }

        log::info!(
            "Frame loop finished after {} ticks, score {}",
            state.frame_count,
            state.player.score
        );
        Ok(())
    }
}
