//! Collision detection and response
//!
//! Runs once per tick after every entity has moved. Reflections only ever
//! flip a direction component toward the play field, so a ball that stays in
//! contact with a wall for several ticks is reflected exactly once.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Ball, GameEvent, GameState, Paddle};
use crate::audio::SoundEffect;
use crate::consts::*;

/// Largest horizontal component a paddle bounce may produce.
///
/// Beyond this `2 - dx²` goes negative and the vertical component would be
/// undefined.
pub const MAX_DEFLECTION: f32 = std::f32::consts::SQRT_2;

/// Which edge band of a brick the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeZone {
    Left,
    Right,
    Bottom,
    Top,
}

impl StrikeZone {
    /// Reflected direction after striking this zone
    pub fn reflect(&self, dir: Vec2) -> Vec2 {
        match self {
            StrikeZone::Left | StrikeZone::Right => Vec2::new(-dir.x, dir.y),
            StrikeZone::Bottom | StrikeZone::Top => Vec2::new(dir.x, -dir.y),
        }
    }
}

/// Run every collision pass for this tick
pub fn resolve(state: &mut GameState) {
    for ball in &mut state.balls {
        reflect_off_walls(ball);
    }
    resolve_paddle(state);
    resolve_bricks(state);
    collect_powerups(state);
}

/// Bounce off the left, right and top (HUD) walls.
///
/// Returns true if the direction changed.
pub fn reflect_off_walls(ball: &mut Ball) -> bool {
    let rect = ball.rect();
    let mut reflected = false;

    if rect.left() <= 0.0 && ball.dir.x < 0.0 {
        ball.dir.x = -ball.dir.x;
        reflected = true;
    }
    if rect.right() >= WINDOW_WIDTH && ball.dir.x > 0.0 {
        ball.dir.x = -ball.dir.x;
        reflected = true;
    }
    if rect.top() <= HUD_HEIGHT && ball.dir.y < 0.0 {
        ball.dir.y = -ball.dir.y;
        reflected = true;
    }

    reflected
}

/// New direction for a ball leaving the paddle.
///
/// The horizontal component is the contact offset from the paddle center in
/// half-widths; the vertical component keeps `dx² + dy² = 2`, so edge hits
/// leave at a shallower angle.
pub fn paddle_bounce(ball_center_x: f32, paddle: &Paddle) -> Vec2 {
    let dx = ((ball_center_x - paddle.pos.x) / (paddle.width / 2.0))
        .clamp(-MAX_DEFLECTION, MAX_DEFLECTION);
    let dy = -(2.0 - dx * dx).max(0.0).sqrt();
    Vec2::new(dx, dy)
}

fn resolve_paddle(state: &mut GameState) {
    let paddle_rect = state.paddle.rect();
    let mut touched = false;

    for ball in &mut state.balls {
        if ball.rect().overlaps(&paddle_rect) {
            ball.dir = paddle_bounce(ball.pos.x, &state.paddle);
            touched = true;
        }
    }

    // One sound per tick, however many balls touched
    if touched {
        state.events.push(GameEvent::Sound(SoundEffect::PaddleHit));
    }
}

/// Classify a ball-brick contact.
///
/// Each zone is a band `margin` deep along one brick edge, tested against
/// the ball's leading point for that edge. Zones are checked left, right,
/// bottom, top and the first match wins. Near corners no zone may match.
pub fn strike_zone(ball: &Rect, brick: &Rect, margin: f32) -> Option<StrikeZone> {
    let left = Rect::new(brick.left(), brick.top(), margin, brick.height());
    let right = Rect::new(brick.right() - margin, brick.top(), margin, brick.height());
    let bottom = Rect::new(brick.left(), brick.bottom() - margin, brick.width(), margin);
    let top = Rect::new(brick.left(), brick.top(), brick.width(), margin);
    let center = ball.center();

    if left.contains_point(Vec2::new(ball.right(), center.y)) {
        Some(StrikeZone::Left)
    } else if right.contains_point(Vec2::new(ball.left(), center.y)) {
        Some(StrikeZone::Right)
    } else if bottom.contains_point(Vec2::new(center.x, ball.top())) {
        Some(StrikeZone::Bottom)
    } else if top.contains_point(Vec2::new(center.x, ball.bottom())) {
        Some(StrikeZone::Top)
    } else {
        None
    }
}

/// Destroy every brick a ball overlaps, reflecting off the struck zone.
///
/// Bricks are marked during the pass and removed afterwards; a brick marked
/// by one ball is skipped by the rest.
fn resolve_bricks(state: &mut GameState) {
    let mut destroyed = vec![false; state.bricks.len()];
    let mut centers: Vec<Vec2> = Vec::new();

    for ball in &mut state.balls {
        let ball_rect = ball.rect();
        for (i, brick) in state.bricks.iter().enumerate() {
            if destroyed[i] || !ball_rect.overlaps(&brick.rect) {
                continue;
            }

            // No zone: the brick still breaks, the ball keeps its heading
            if let Some(zone) = strike_zone(&ball_rect, &brick.rect, ball.radius()) {
                ball.dir = zone.reflect(ball.dir);
            }

            destroyed[i] = true;
            centers.push(brick.rect.center());
        }
    }

    if centers.is_empty() {
        return;
    }

    let mut index = 0;
    state.bricks.retain(|_| {
        let keep = !destroyed[index];
        index += 1;
        keep
    });

    for center in centers {
        state.reward_brick(center);
    }
}

/// Pick up every powerup touching the paddle
fn collect_powerups(state: &mut GameState) {
    let paddle_rect = state.paddle.rect();
    let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.powerups)
        .into_iter()
        .partition(|p| p.rect().overlaps(&paddle_rect));
    state.powerups = remaining;

    for powerup in collected {
        state.apply_powerup(powerup.kind);
    }
}
