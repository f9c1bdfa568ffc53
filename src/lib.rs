//! Brick Breaker - A single-screen arcade block breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `level`: Brick layout parsing and the level catalog
//! - `frame_loop`: Fixed timestep driver between input, sim and presentation
//! - `platform`: Presentation/input contracts and the terminal frontend
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod frame_loop;
pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;

pub use frame_loop::{FrameError, FrameLoop};
pub use level::{BrickColor, Level, LevelCatalog, LevelError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (ticks per second)
    pub const TICK_RATE: u32 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const WINDOW_WIDTH: f32 = 1200.0;
    pub const WINDOW_HEIGHT: f32 = 1000.0;
    /// Height of the HUD strip along the top edge (balls bounce off its bottom)
    pub const HUD_HEIGHT: f32 = 40.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_BOTTOM_BUFFER: f32 = 25.0;
    /// Paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_DIAMETER: f32 = 25.0;
    /// Ball speed is the level number plus this (pixels per tick)
    pub const BALL_SPEED_BONUS: u32 = 3;
    /// Distance from the bottom edge where a reset ball reappears
    pub const BALL_RESET_OFFSET: f32 = 55.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 12;
    pub const BRICK_COLUMNS: usize = 11;
    pub const BRICK_BUFFER: f32 = 5.0;
    /// Bricks occupy the top half of the window
    pub const BRICK_FIELD_HEIGHT: f32 = WINDOW_HEIGHT / 2.0;

    /// Powerup defaults
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Fall speed (pixels per tick)
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    /// Chance that a destroyed brick drops a powerup
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;

    /// Player defaults
    pub const STARTING_LIVES: u32 = 3;

    /// Scoring
    pub const POINTS_PER_LEVEL: u64 = 10;
    /// Bricks hit within this many seconds of the level start earn a time bonus
    pub const TIME_BONUS_WINDOW: u32 = 60;
}

/// Width of a single brick cell
#[inline]
pub fn brick_width() -> f32 {
    use consts::*;
    (WINDOW_WIDTH - (BRICK_COLUMNS as f32 + 1.0) * BRICK_BUFFER) / BRICK_COLUMNS as f32
}

/// Height of a single brick cell
#[inline]
pub fn brick_height() -> f32 {
    use consts::*;
    (BRICK_FIELD_HEIGHT - (BRICK_ROWS as f32 + 1.0) * BRICK_BUFFER) / BRICK_ROWS as f32
}
