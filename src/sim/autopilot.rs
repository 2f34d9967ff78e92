//! Demo autopilot
//!
//! Plays the game through the same commands a player sends. Only the right
//! half of the paddle sends the ball upward, so it lines the ball up with a
//! point right of centre, jittered so rallies do not loop.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Direction;
use super::tick::{Command, ControllerPhase, RoundController};

/// How often (in decisions) a new aim point is rolled
const RETARGET_EVERY: u32 = 90;
/// Aim range along the paddle, 0 = left edge, 1 = right edge
const AIM_MIN: f32 = 0.6;
const AIM_MAX: f32 = 0.9;

pub struct Autopilot {
    rng: Pcg32,
    /// Where along the paddle the ball should land
    aim: f32,
    decisions: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let aim = rng.random_range(AIM_MIN..AIM_MAX);
        Self {
            rng,
            aim,
            decisions: 0,
        }
    }

    /// Current aim point along the paddle
    pub fn aim(&self) -> f32 {
        self.aim
    }

    /// Pick at most one command for this frame
    pub fn decide(&mut self, controller: &RoundController) -> Option<Command> {
        if controller.phase() == ControllerPhase::Paused {
            return Some(Command::Play);
        }

        self.decisions += 1;
        if self.decisions % RETARGET_EVERY == 0 {
            self.aim = self.rng.random_range(AIM_MIN..AIM_MAX);
        }

        let round = controller.round();
        let paddle = &round.paddle;
        let target_left = round.ball.pos.x - self.aim * paddle.width();
        let diff = target_left - paddle.left();
        let deadband = paddle.step / 2.0;

        let wanted = if diff > deadband {
            Some(Direction::Right)
        } else if diff < -deadband {
            Some(Direction::Left)
        } else {
            None
        };

        match (Direction::from_sign(paddle.direction()), wanted) {
            (None, Some(direction)) => Some(Command::StartPaddleMove(direction)),
            (Some(_), None) => Some(Command::StopPaddleMove),
            // Reversing takes a stop first; the start follows next frame
            (Some(current), Some(direction)) if current != direction => {
                Some(Command::StopPaddleMove)
            }
            _ => None,
        }
    }
}
