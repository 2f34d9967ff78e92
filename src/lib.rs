//! Brickfall - a bordered-arena Breakout game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, round controller)
//! - `input`: Key events to controller commands
//! - `platform`: Render/audio collaborator contract and frame driver
//! - `settings`: Data-driven configuration
//! - `audio`, `web`: Browser audio and binding (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{KeyBindings, Settings};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Logical arena size (square, both axes)
    pub const ARENA_SIZE: f32 = 1000.0;
    /// Uniform border inset around the playable area
    pub const BORDER_THICKNESS: f32 = 30.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 25.0;
    pub const PADDLE_START_LEFT: f32 = 400.0;
    pub const PADDLE_START_TOP: f32 = 800.0;
    /// Distance travelled per paddle timer fire
    pub const PADDLE_STEP: f32 = 30.0;
    /// Paddle timer period in milliseconds (not frame-locked)
    pub const PADDLE_INTERVAL_MS: u64 = 40;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_START_LEFT: f32 = 450.0;
    pub const BALL_START_TOP: f32 = 500.0;
    pub const BALL_START_VX: f32 = 5.0;
    pub const BALL_START_VY: f32 = -5.0;
    /// Speed after any paddle deflection
    pub const BALL_SPEED: f32 = 5.0;
    /// Maximum deflection off the paddle, either side of straight
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 45.0;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_COUNT: usize = 10;
    pub const BRICKS_PER_ROW: usize = 10;
    pub const BRICK_ROW_LEFT: f32 = 75.0;
    pub const BRICK_SPACING: f32 = 90.0;
    pub const BRICK_FIRST_ROW_TOP: f32 = 90.0;
    pub const BRICK_ROW_SPACING: f32 = 50.0;
    /// Points for every brick impact
    pub const BRICK_POINTS: u64 = 10;
}

/// Axis-aligned bounding box in arena units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    #[inline]
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Bounding square of a circle
    #[inline]
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    /// Overlap test where touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Overlap test where touching edges count
    #[inline]
    pub fn touches(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// Range of valid paddle `left` values for a given border and paddle width
#[inline]
pub fn paddle_left_range(border: f32, width: f32) -> (f32, f32) {
    (border, consts::ARENA_SIZE - border - width)
}
