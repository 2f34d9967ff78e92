//! Game state and core simulation types
//!
//! Everything a round owns lives here: arena bounds, paddle, ball, bricks and
//! the two score counters.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::MoveTimer;
use crate::consts::*;
use crate::{Aabb, paddle_left_range};

/// Something the host may want to react to (sound, effects, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the left or right border
    WallImpact,
    /// Ball damaged the brick at `index`
    BrickHit { index: usize, health: u32 },
    /// All bricks cleared; next round starts at `next_health`
    LevelCleared { next_health: u32 },
    /// Ball fell past the bottom border
    RoundFailed { best: u64 },
    /// Controller phase changed
    PhaseChanged {
        from: super::tick::ControllerPhase,
        to: super::tick::ControllerPhase,
    },
}

/// Horizontal paddle movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            -1 => Some(Direction::Left),
            1 => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Arena bounds. Positions are logical units independent of display scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub size: f32,
    pub border: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            size: ARENA_SIZE,
            border: BORDER_THICKNESS,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Distance moved per timer fire
    pub step: f32,
    /// Timer period
    pub interval: Duration,
    /// Running move timer, if any
    #[serde(skip)]
    timer: Option<MoveTimer>,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(PADDLE_START_LEFT, PADDLE_START_TOP)
    }
}

impl Paddle {
    pub fn new(left: f32, top: f32) -> Self {
        Self {
            pos: Vec2::new(left, top),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            step: PADDLE_STEP,
            interval: Duration::from_millis(PADDLE_INTERVAL_MS),
            timer: None,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    /// Current movement direction as -1, 0 or +1
    pub fn direction(&self) -> i8 {
        self.timer.as_ref().map_or(0, |t| t.direction().sign())
    }

    pub fn is_moving(&self) -> bool {
        self.timer.is_some()
    }

    /// Begin continuous movement. Ignored while a move is already running.
    pub fn start_move(&mut self, direction: Direction) {
        if self.timer.is_some() {
            return;
        }
        self.timer = Some(MoveTimer::new(direction, self.interval));
    }

    /// Cancel movement and re-validate position. Safe to call when stopped.
    pub fn stop_move(&mut self, border: f32) {
        self.timer = None;
        self.validate_and_fix_position(border);
    }

    /// Advance the move timer by `dt`, stepping once per fire.
    ///
    /// Returns the number of steps taken.
    pub fn advance(&mut self, dt: Duration, border: f32) -> u32 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        let fires = timer.advance(dt);
        let delta = timer.direction().sign() as f32 * self.step;

        let mut steps = 0;
        for _ in 0..fires {
            self.pos.x += delta;
            steps += 1;
            if self.validate_and_fix_position(border) {
                break;
            }
        }
        steps
    }

    /// Clamp `left` into the playable range. Hitting a wall cancels movement.
    ///
    /// Returns true if the paddle had to be clamped.
    pub fn validate_and_fix_position(&mut self, border: f32) -> bool {
        let (min, max) = paddle_left_range(border, self.width());
        let clamped = self.pos.x.clamp(min, max);
        if clamped != self.pos.x {
            self.pos.x = clamped;
            self.timer = None;
            return true;
        }
        false
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_LEFT, BALL_START_TOP),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Bounding square
    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Move by one tick of velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Brick colour as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickColor(pub u32);

impl BrickColor {
    /// CSS hex form, e.g. `#e51f1f`
    pub fn css(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Brick palette, index = health - 1
pub const PALETTE: [BrickColor; 5] = [
    BrickColor(0xe51f1f),
    BrickColor(0xf2a134),
    BrickColor(0xf7e379),
    BrickColor(0xbbdb44),
    BrickColor(0x44ce1b),
];

/// Colour for a brick health value. Exhausted bricks have none; health past
/// the end of the palette keeps the last colour.
pub fn color_for_health(health: u32) -> Option<BrickColor> {
    if health == 0 {
        return None;
    }
    let index = (health as usize).min(PALETTE.len()) - 1;
    Some(PALETTE[index])
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
}

impl Brick {
    pub fn new(left: f32, top: f32, health: u32) -> Self {
        Self {
            pos: Vec2::new(left, top),
            size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            health,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }

    /// Bricks at zero health are inert and hidden but stay in the round
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn color(&self) -> Option<BrickColor> {
        color_for_health(self.health)
    }

    /// Take one point of damage
    pub fn hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }
}

/// A score counter with its display anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub points: u64,
    /// Where the presentation layer draws it
    pub anchor: Vec2,
}

impl Score {
    pub fn new(anchor: Vec2, points: u64) -> Self {
        Self { points, anchor }
    }

    pub fn add(&mut self, points: u64) {
        self.points += points;
    }

    pub fn reset(&mut self) {
        self.points = 0;
    }

    /// Raise to `other` if it is higher. Never lowers.
    pub fn raise_to(&mut self, other: u64) -> bool {
        if other > self.points {
            self.points = other;
            return true;
        }
        false
    }
}

/// Best score display anchor
pub const BEST_SCORE_ANCHOR: Vec2 = Vec2::new(10.0, 30.0);
/// Current score display anchor
pub const CURRENT_SCORE_ANCHOR: Vec2 = Vec2::new(10.0, 900.0);

/// One playthrough: constructed fresh on every level change or failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub arena: Arena,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Layout order, row-major
    pub bricks: Vec<Brick>,
    pub score_current: Score,
    pub score_best: Score,
    /// Starting health of this round's bricks
    pub level: u32,
}

impl Round {
    /// Build a round with the standard layout.
    ///
    /// `initial_health` must be at least 1; a round of zero-health bricks is
    /// outside the contract and would be cleared on its first tick.
    pub fn new(initial_health: u32, carried_best: u64, carried_current: u64) -> Self {
        debug_assert!(initial_health >= 1, "brick health must start at 1 or more");

        let mut bricks = Vec::with_capacity(BRICK_COUNT);
        let mut left = BRICK_ROW_LEFT;
        let mut top = BRICK_FIRST_ROW_TOP - BRICK_ROW_SPACING;
        for index in 0..BRICK_COUNT {
            if index % BRICKS_PER_ROW == 0 {
                left = BRICK_ROW_LEFT;
                top += BRICK_ROW_SPACING;
            }
            bricks.push(Brick::new(left, top, initial_health));
            left += BRICK_SPACING;
        }

        Self {
            arena: Arena::default(),
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks,
            score_current: Score::new(CURRENT_SCORE_ANCHOR, carried_current),
            score_best: Score::new(BEST_SCORE_ANCHOR, carried_best),
            level: initial_health,
        }
    }

    /// Bricks still standing
    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }
}
