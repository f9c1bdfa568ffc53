//! Game state and core simulation types
//!
//! Owns every entity plus the level lifecycle: level setup, completion,
//! life loss, game over and the win wrap-around. Pauses are plain phases;
//! the tick function skips all physics while one is active.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::level::{BrickColor, Level, LevelCatalog, LevelError};
use crate::{brick_height, brick_width};

/// Why the game is waiting for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    /// Fresh level set up, waiting to start
    LevelStart,
    /// All bricks cleared; the next level loads on continue
    LevelComplete,
    /// Last ball fell, lives remain
    LifeLost,
    /// Last ball fell with no lives left; the game resets on continue
    GameOver,
    /// Every level cleared; play restarts at level 1 on continue
    Won,
}

impl PauseReason {
    pub fn sub_text(&self) -> &'static str {
        match self {
            PauseReason::LevelStart => "Press ENTER to continue",
            PauseReason::LevelComplete | PauseReason::LifeLost => "Press ENTER to Continue",
            PauseReason::GameOver => "Press ENTER to Play Again",
            PauseReason::Won => "Press ENTER to play again!",
        }
    }

    /// Whether the pause screen blanks the play field
    pub fn hides_gameplay(&self) -> bool {
        matches!(self, PauseReason::LevelComplete | PauseReason::Won)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Blocked until the player continues (or quits)
    Paused(PauseReason),
}

/// Side effects for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Paused {
        reason: PauseReason,
        main_text: String,
        sub_text: String,
        hide_gameplay: bool,
    },
    PowerupCollected(PowerupKind),
}

/// Player progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub lives: u32,
    pub score: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lives: STARTING_LIVES,
            score: 0,
        }
    }
}

impl Player {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        };
        paddle.reset();
        paddle
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::new(self.width, self.height))
    }

    /// Center horizontally, resting just above the bottom edge
    pub fn reset(&mut self) {
        self.pos = Vec2::new(
            WINDOW_WIDTH / 2.0,
            WINDOW_HEIGHT - PADDLE_BOTTOM_BUFFER - self.height / 2.0,
        );
    }

    /// Middle of the top edge (where new balls spawn)
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.height / 2.0)
    }

    /// Shift horizontally, staying inside the play field
    pub fn move_by(&mut self, dx: f32) {
        let half = self.width / 2.0;
        self.pos.x = (self.pos.x + dx).clamp(half, WINDOW_WIDTH - half);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    /// Direction components; `y` is ±1 until the paddle reshapes it
    pub dir: Vec2,
    /// Pixels per tick along each direction component
    pub speed: f32,
    pub diameter: f32,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, speed: f32, dx: f32) -> Self {
        Self {
            id,
            pos,
            dir: Vec2::new(dx, -1.0),
            speed,
            diameter: BALL_DIAMETER,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.diameter))
    }

    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }

    /// Fully below the bottom edge
    pub fn has_fallen(&self) -> bool {
        self.rect().top() >= WINDOW_HEIGHT
    }

    /// Return to the launch spot above the paddle, heading up
    pub fn reset(&mut self, dx: f32) {
        self.pos = Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT - BALL_RESET_OFFSET);
        self.dir = Vec2::new(dx, -1.0);
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    pub color: BrickColor,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Launches an extra ball from the paddle
    AddBall,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    /// Center position
    pub pos: Vec2,
    /// Downward speed (pixels per tick)
    pub fall_speed: f32,
}

impl Powerup {
    pub fn new(id: u32, kind: PowerupKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            fall_speed: POWERUP_FALL_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    pub fn advance(&mut self) {
        self.pos.y += self.fall_speed;
    }

    pub fn has_fallen(&self) -> bool {
        self.rect().top() >= WINDOW_HEIGHT
    }
}

/// Values shown in the HUD strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level_timer: u32,
}

/// Points for destroying one brick
///
/// `level_number * 10`, plus `60 - level_timer` while the timer is within
/// the first minute of the level.
pub fn brick_award(level_number: u32, level_timer: u32) -> u64 {
    let base = level_number as u64 * POINTS_PER_LEVEL;
    if level_timer <= TIME_BONUS_WINDOW {
        base + (TIME_BONUS_WINDOW - level_timer) as u64
    } else {
        base
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub paddle: Paddle,
    /// Active balls
    pub balls: Vec<Ball>,
    /// Remaining bricks in row-major order
    pub bricks: Vec<Brick>,
    /// Falling pickups
    pub powerups: Vec<Powerup>,
    /// Current level (1-based)
    pub level_number: u32,
    /// Layout of the level in play (`None` while the win screen is up)
    pub level: Option<Level>,
    /// Whole seconds since the level started
    pub level_timer: u32,
    /// Simulated seconds since the level started
    level_time: f64,
    /// Gameplay ticks (pauses excluded)
    pub frame_count: u64,
    pub running: bool,
    pub phase: GamePhase,
    /// Pending presentation events
    pub events: Vec<GameEvent>,
    /// Run seed for reproducibility
    pub seed: u64,
    catalog: LevelCatalog,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game and set up the first level
    pub fn new(catalog: LevelCatalog, seed: u64) -> Result<Self, LevelError> {
        let mut state = Self {
            player: Player::default(),
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            level_number: 1,
            level: None,
            level_timer: 0,
            level_time: 0.0,
            frame_count: 0,
            running: true,
            phase: GamePhase::Playing,
            events: Vec::new(),
            seed,
            catalog,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.start_level()?;

        Ok(state)
    }

    /// Serialize the whole game, RNG position included
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a game saved with [`GameState::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused(_))
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.player.score,
            lives: self.player.lives,
            level_timer: self.level_timer,
        }
    }

    /// Drain pending presentation events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit_sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    /// Ball speed for the current level
    pub fn ball_speed(&self) -> f32 {
        (self.level_number + BALL_SPEED_BONUS) as f32
    }

    /// Random initial horizontal direction (left or right)
    fn random_dx(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    /// Spawn a ball on the paddle's top edge
    pub fn spawn_ball_at_paddle(&mut self) {
        let id = self.next_entity_id();
        let dx = self.random_dx();
        let ball = Ball::new(id, self.paddle.top_center(), self.ball_speed(), dx);
        self.balls.push(ball);
    }

    /// Advance the level timer by simulated time
    pub fn advance_timer(&mut self, dt: f32) {
        self.level_time += dt as f64;
        // Tolerate float drift from summing fixed timesteps
        self.level_timer = (self.level_time + 1e-6).floor() as u32;
    }

    /// Load the current level and pause before play.
    ///
    /// Past the last level this pauses on the win screen instead.
    pub fn start_level(&mut self) -> Result<(), LevelError> {
        self.level_time = 0.0;
        self.level_timer = 0;

        let Some(level) = self.catalog.load(self.level_number)? else {
            log::info!("All {} levels cleared", self.catalog.max_level());
            self.level = None;
            self.pause(PauseReason::Won);
            return Ok(());
        };

        self.spawn_ball_at_paddle();
        self.populate_bricks(&level);
        log::info!(
            "Level {}: {} ({} bricks)",
            level.index,
            level.name,
            self.bricks.len()
        );
        self.level = Some(level);
        self.pause(PauseReason::LevelStart);

        Ok(())
    }

    /// Lay out one brick per occupied cell
    fn populate_bricks(&mut self, level: &Level) {
        let width = brick_width();
        let height = brick_height();

        for ((row, col), color) in level.bricks() {
            let x = BRICK_BUFFER * col as f32 + width * (col as f32 - 1.0);
            let y = BRICK_BUFFER * row as f32 + height * (row as f32 - 1.0) + HUD_HEIGHT;
            let brick = Brick {
                id: self.next_entity_id(),
                rect: Rect::new(x, y, width, height),
                color,
            };
            self.bricks.push(brick);
        }
    }

    /// Enter a pause and announce it
    pub fn pause(&mut self, reason: PauseReason) {
        let main_text = match reason {
            PauseReason::LevelStart => {
                let name = self.level.as_ref().map(|l| l.name.as_str()).unwrap_or("");
                format!("Level: {} - {}", self.level_number, name)
            }
            PauseReason::LevelComplete => "Level Complete".to_string(),
            PauseReason::LifeLost => "Life Lost!".to_string(),
            PauseReason::GameOver => "Game Over!".to_string(),
            PauseReason::Won => "You Win!".to_string(),
        };

        self.phase = GamePhase::Paused(reason);
        self.events.push(GameEvent::Paused {
            reason,
            main_text,
            sub_text: reason.sub_text().to_string(),
            hide_gameplay: reason.hides_gameplay(),
        });
    }

    /// Leave the current pause, completing whatever transition it guards
    pub fn resume(&mut self) -> Result<(), LevelError> {
        let GamePhase::Paused(reason) = self.phase else {
            return Ok(());
        };

        self.phase = GamePhase::Playing;
        match reason {
            PauseReason::LevelStart | PauseReason::LifeLost => Ok(()),
            PauseReason::LevelComplete => self.start_level(),
            PauseReason::GameOver => self.reset_game(),
            PauseReason::Won => {
                self.player.reset();
                self.level_number = 1;
                self.start_level()
            }
        }
    }

    /// Bricks are gone: move on to the next level
    pub fn complete_level(&mut self) {
        log::info!(
            "Level {} complete in {}s, score {}",
            self.level_number,
            self.level_timer,
            self.player.score
        );
        self.level_number += 1;
        self.paddle.reset();
        self.balls.clear();
        self.emit_sound(SoundEffect::LevelComplete);
        self.pause(PauseReason::LevelComplete);
    }

    /// The last ball fell: take a life and reset positions
    pub fn lose_life(&mut self) {
        self.player.lives = self.player.lives.saturating_sub(1);
        self.emit_sound(SoundEffect::LifeLost);

        let dx = self.random_dx();
        for ball in &mut self.balls {
            ball.reset(dx);
        }
        self.paddle.reset();
        self.powerups.clear();

        if self.player.lives == 0 {
            log::info!(
                "Game over on level {} with score {}",
                self.level_number,
                self.player.score
            );
            self.pause(PauseReason::GameOver);
        } else {
            log::debug!("Life lost, {} remaining", self.player.lives);
            self.pause(PauseReason::LifeLost);
        }
    }

    /// Start over from level 1 with fresh player stats
    pub fn reset_game(&mut self) -> Result<(), LevelError> {
        self.player.reset();
        self.bricks.clear();
        self.balls.clear();
        self.powerups.clear();
        self.level_number = 1;
        self.start_level()
    }

    /// Debug shortcut: remove every brick
    pub fn clear_bricks(&mut self) {
        log::debug!("Debug: clearing {} bricks", self.bricks.len());
        self.bricks.clear();
    }

    /// Score, sound and a possible powerup drop for a destroyed brick
    pub(crate) fn reward_brick(&mut self, brick_center: Vec2) {
        self.emit_sound(SoundEffect::BrickHit);
        self.player.score += brick_award(self.level_number, self.level_timer);

        if self.rng.random_bool(POWERUP_DROP_CHANCE) {
            let id = self.next_entity_id();
            self.powerups
                .push(Powerup::new(id, PowerupKind::AddBall, brick_center));
        }
    }

    /// Apply a collected powerup
    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        self.events.push(GameEvent::PowerupCollected(kind));
        match kind {
            PowerupKind::AddBall => {
                self.spawn_ball_at_paddle();
                log::debug!("AddBall collected, {} balls in play", self.balls.len());
            }
        }
    }
}
