//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of host concerns:
//! - One tick per host frame, fixed velocities, no wall clock
//! - Stable iteration order (bricks in layout order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod timer;

pub use autopilot::Autopilot;
pub use collision::{Outcome, detect_collisions, impact_angle};
pub use state::{
    Arena, Ball, Brick, BrickColor, Direction, GameEvent, PALETTE, Paddle, Round, Score,
    color_for_health,
};
pub use tick::{
    BallView, BrickView, Command, ControllerPhase, PaddleView, RoundController,
    ScoreView, Snapshot,
};
pub use timer::MoveTimer;
