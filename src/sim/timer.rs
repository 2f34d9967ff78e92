//! Paddle move timer
//!
//! A periodic timer that is advanced by the host with elapsed wall time rather
//! than being tied to the physics tick. Dropping it cancels it.

use std::time::Duration;

use super::state::Direction;

/// Owned handle for one continuous paddle move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTimer {
    direction: Direction,
    interval: Duration,
    /// Time accumulated since the last fire
    elapsed: Duration,
}

impl MoveTimer {
    pub fn new(direction: Direction, interval: Duration) -> Self {
        Self {
            direction,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Accumulate `dt` and return how many periods elapsed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let fires = (self.elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        self.elapsed -= self.interval * fires;
        fires
    }
}
