//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, marked removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{StrikeZone, paddle_bounce, reflect_off_walls, strike_zone};
pub use rect::Rect;
pub use state::{
    Ball, Brick, GameEvent, GamePhase, GameState, Hud, Paddle, PauseReason, Player, Powerup,
    PowerupKind, brick_award,
};
pub use tick::{TickInput, tick};
