//! Fixed timestep simulation tick
//!
//! Core game loop step: input, movement, collisions, then the per-tick
//! state checks (fallen balls, level completion, fallen powerups).

use super::collision;
use super::state::{GamePhase, GameState};
use crate::level::LevelError;
use crate::platform::InputSignal;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Paddle movement (held keys)
    pub move_left: bool,
    pub move_right: bool,
    /// Continue past the current pause
    pub confirm: bool,
    /// Exit the game, even mid-pause
    pub quit: bool,
    /// Remove every brick (debug/testing)
    pub clear_bricks: bool,
}

impl TickInput {
    pub fn from_signals(signals: &[InputSignal]) -> Self {
        let mut input = Self::default();
        input.merge(signals);
        input
    }

    /// Fold a frame's signals in. Movement reflects only this frame;
    /// one-shot commands stay latched until [`TickInput::clear_one_shots`].
    pub fn merge(&mut self, signals: &[InputSignal]) {
        self.move_left = false;
        self.move_right = false;
        for signal in signals {
            match signal {
                InputSignal::MoveLeft => self.move_left = true,
                InputSignal::MoveRight => self.move_right = true,
                InputSignal::Continue => self.confirm = true,
                InputSignal::Quit => self.quit = true,
                InputSignal::DebugClearBricks => self.clear_bricks = true,
            }
        }
    }

    /// Clear one-shot inputs after they have been processed
    pub fn clear_one_shots(&mut self) {
        self.confirm = false;
        self.clear_bricks = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), LevelError> {
    if input.quit {
        if state.running {
            log::info!("Quit requested");
        }
        state.running = false;
        return Ok(());
    }
    if !state.running {
        return Ok(());
    }

    // Paused: only a continue gets through, and it never runs physics
    if let GamePhase::Paused(_) = state.phase {
        if input.confirm {
            state.resume()?;
        }
        return Ok(());
    }

    state.frame_count += 1;
    state.advance_timer(dt);

    if input.clear_bricks {
        state.clear_bricks();
    }

    let mut direction = 0.0;
    if input.move_left {
        direction -= 1.0;
    }
    if input.move_right {
        direction += 1.0;
    }
    if direction != 0.0 {
        let dx = direction * state.paddle.speed;
        state.paddle.move_by(dx);
    }

    for ball in &mut state.balls {
        ball.advance();
    }
    for powerup in &mut state.powerups {
        powerup.advance();
    }

    collision::resolve(state);

    check_fallen_balls(state);
    if !state.is_paused() {
        check_level_completion(state);
    }
    check_fallen_powerups(state);

    Ok(())
}

/// Drop balls below the bottom edge; losing the last one costs a life
fn check_fallen_balls(state: &mut GameState) {
    let fallen = state.balls.iter().filter(|b| b.has_fallen()).count();
    if fallen == 0 {
        return;
    }

    if fallen < state.balls.len() {
        state.balls.retain(|b| !b.has_fallen());
        return;
    }

    // Every ball is out: keep one to respawn above the paddle
    state.balls.truncate(1);
    state.lose_life();
}

fn check_level_completion(state: &mut GameState) {
    if state.bricks.is_empty() {
        state.complete_level();
    }
}

fn check_fallen_powerups(state: &mut GameState) {
    state.powerups.retain(|p| !p.has_fallen());
}
