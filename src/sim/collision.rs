//! Collision detection and response
//!
//! Three checks run every tick in a fixed order: paddle, then bricks, then
//! walls. They are independent (a single tick can trigger all three) except
//! that clearing the last brick skips the wall check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Brick, GameEvent, Paddle, Round, Score};
use crate::consts::*;

/// Classification of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    /// Every brick is down
    Win,
    /// Ball fell past the bottom border
    Failed,
}

/// Outgoing angle (radians) for a paddle impact at `relative` along the
/// paddle, where 0 is the left edge and 1 the right edge.
///
/// Not clamped: hits that overlap past a paddle edge produce angles beyond
/// ±45°.
#[inline]
pub fn impact_angle(relative: f32) -> f32 {
    (MAX_BOUNCE_ANGLE_DEG * (2.0 * relative - 1.0)).to_radians()
}

/// Run all collision checks for a tick in order: paddle, bricks, walls.
pub fn detect_collisions(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &mut [Brick],
    border: f32,
    score_current: &mut Score,
    score_best: &mut Score,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    detect_paddle_collision(ball, paddle);

    if detect_brick_collision(ball, bricks, score_current, score_best, events) == Outcome::Win {
        return Outcome::Win;
    }

    detect_wall_collision(ball, border, score_current, events)
}

/// [`detect_collisions`] over the entities of a round
pub fn resolve_round(round: &mut Round, events: &mut Vec<GameEvent>) -> Outcome {
    let Round {
        arena,
        paddle,
        ball,
        bricks,
        score_current,
        score_best,
        ..
    } = round;
    detect_collisions(
        ball,
        paddle,
        bricks,
        arena.border,
        score_current,
        score_best,
        events,
    )
}

/// Deflect off the paddle. The outgoing direction depends only on where the
/// ball hit, never on the incoming velocity.
///
/// Returns true on a hit.
pub fn detect_paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    if !ball.bounds().overlaps(&paddle.bounds()) {
        return false;
    }

    let relative = (ball.pos.x - paddle.left()) / paddle.width();
    let angle = impact_angle(relative);
    ball.vel = Vec2::new(angle.cos() * BALL_SPEED, -angle.sin() * BALL_SPEED);
    true
}

/// Damage every live brick the ball touches.
///
/// Each hit inverts `vy` on its own, so two bricks hit in the same tick cancel
/// out. Returns [`Outcome::Win`] once no brick has health left.
pub fn detect_brick_collision(
    ball: &mut Ball,
    bricks: &mut [Brick],
    score_current: &mut Score,
    score_best: &mut Score,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    let ball_box = ball.bounds();
    let mut outcome = Outcome::Win;

    for (index, brick) in bricks.iter_mut().enumerate() {
        if brick.is_alive() && ball_box.touches(&brick.bounds()) {
            ball.vel.y = -ball.vel.y;
            brick.hit();
            score_current.add(BRICK_POINTS);
            score_best.raise_to(score_current.points);
            log::debug!("Brick {} hit, health now {}", index, brick.health);
            events.push(GameEvent::BrickHit {
                index,
                health: brick.health,
            });
        }
        if brick.is_alive() {
            outcome = Outcome::Continue;
        }
    }

    outcome
}

/// Bounce off the side and top borders; falling past the bottom fails the
/// round and zeroes the current score.
pub fn detect_wall_collision(
    ball: &mut Ball,
    border: f32,
    score_current: &mut Score,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    let far = ARENA_SIZE - border;

    if ball.pos.x < border || ball.pos.x + ball.radius > far {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::WallImpact);
    }
    if ball.pos.y - ball.radius < border {
        ball.vel.y = -ball.vel.y;
    }
    if ball.pos.y + ball.radius > far {
        score_current.reset();
        return Outcome::Failed;
    }

    Outcome::Continue
}
