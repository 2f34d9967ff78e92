//! Round controller
//!
//! Owns the single current round, applies player commands and advances the
//! simulation one tick per host frame. Winning or losing swaps in a freshly
//! built round instead of restarting anything.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::collision::{Outcome, resolve_round};
use super::state::{Direction, GameEvent, Round};
use crate::consts::*;

/// Controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerPhase {
    /// Waiting for Play (or a pause toggle)
    Paused,
    /// Ticking every frame
    Running,
    /// Swapping in the next round
    Transitioning,
}

/// Player/host commands, queued and applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    StartPaddleMove(Direction),
    StopPaddleMove,
    TogglePause,
    /// The Play affordance shown while paused
    Play,
}

/// Read-only paddle state for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub direction: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub left: f32,
    pub top: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub health: u32,
    /// CSS colour, absent once the brick is exhausted
    pub color: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub label: String,
    pub points: u64,
    pub left: f32,
    pub top: f32,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: ControllerPhase,
    pub level: u32,
    pub arena_size: f32,
    pub border: f32,
    pub paddle: PaddleView,
    pub ball: BallView,
    pub bricks: Vec<BrickView>,
    pub best: ScoreView,
    pub current: ScoreView,
    pub show_play_button: bool,
}

/// Drives rounds: one tick per frame, command queue, round replacement
#[derive(Debug)]
pub struct RoundController {
    round: Round,
    phase: ControllerPhase,
    commands: VecDeque<Command>,
    events: Vec<GameEvent>,
    paddle_step: f32,
    paddle_interval: Duration,
    /// Ticks simulated across all rounds
    ticks: u64,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundController {
    /// Start paused at level 1 with no score
    pub fn new() -> Self {
        Self::with_round(Round::new(1, 0, 0))
    }

    pub fn with_round(round: Round) -> Self {
        Self {
            paddle_step: round.paddle.step,
            paddle_interval: round.paddle.interval,
            round,
            phase: ControllerPhase::Paused,
            commands: VecDeque::new(),
            events: Vec::new(),
            ticks: 0,
        }
    }

    /// Override paddle cadence for this and every later round
    pub fn with_paddle_cadence(mut self, step: f32, interval: Duration) -> Self {
        self.paddle_step = step;
        self.paddle_interval = interval;
        self.round.paddle.step = step;
        self.round.paddle.interval = interval;
        self
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Mutable access for hosts and tests that stage a position
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ControllerPhase::Running
    }

    pub fn level(&self) -> u32 {
        self.round.level
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queue a command for the next [`apply_commands`](Self::apply_commands)
    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Apply every queued command in arrival order
    pub fn apply_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::StartPaddleMove(direction) => self.start_paddle_move(direction),
            Command::StopPaddleMove => self.stop_paddle_move(),
            Command::TogglePause => self.toggle_pause(),
            Command::Play => self.play(),
        }
    }

    /// Leave the paused state. No effect otherwise.
    pub fn play(&mut self) {
        if self.phase == ControllerPhase::Paused {
            self.set_phase(ControllerPhase::Running);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            ControllerPhase::Running => self.set_phase(ControllerPhase::Paused),
            ControllerPhase::Paused => self.set_phase(ControllerPhase::Running),
            ControllerPhase::Transitioning => {}
        }
    }

    pub fn start_paddle_move(&mut self, direction: Direction) {
        self.round.paddle.start_move(direction);
    }

    pub fn stop_paddle_move(&mut self) {
        let border = self.round.arena.border;
        self.round.paddle.stop_move(border);
    }

    /// Advance the paddle timer by elapsed host time. Runs while paused too.
    pub fn advance_paddle(&mut self, dt: Duration) -> u32 {
        let border = self.round.arena.border;
        self.round.paddle.advance(dt, border)
    }

    /// Advance the simulation by one tick.
    ///
    /// Returns `None` while not running.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.phase != ControllerPhase::Running {
            return None;
        }
        self.ticks += 1;

        self.round.ball.advance();
        let outcome = resolve_round(&mut self.round, &mut self.events);

        match outcome {
            Outcome::Continue => {}
            Outcome::Failed => {
                let best = self.round.score_best.points;
                log::info!("Round failed at level {} (best {})", self.round.level, best);
                self.events.push(GameEvent::RoundFailed { best });
                self.replace_round(1, best, 0);
            }
            Outcome::Win => {
                let next_health = self.round.level + 1;
                let best = self.round.score_best.points;
                let current = self.round.score_current.points;
                log::info!("Level {} cleared, next brick health {}", self.round.level, next_health);
                self.events.push(GameEvent::LevelCleared { next_health });
                self.replace_round(next_health, best, current);
            }
        }

        Some(outcome)
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let round = &self.round;
        let paddle = &round.paddle;
        let ball = &round.ball;

        Snapshot {
            phase: self.phase,
            level: round.level,
            arena_size: ARENA_SIZE,
            border: round.arena.border,
            paddle: PaddleView {
                left: paddle.left(),
                top: paddle.top(),
                width: paddle.width(),
                height: paddle.height(),
                direction: paddle.direction(),
            },
            ball: BallView {
                left: ball.pos.x,
                top: ball.pos.y,
                radius: ball.radius,
                vx: ball.vel.x,
                vy: ball.vel.y,
            },
            bricks: round
                .bricks
                .iter()
                .map(|b| BrickView {
                    left: b.pos.x,
                    top: b.pos.y,
                    width: b.size.x,
                    height: b.size.y,
                    health: b.health,
                    color: b.color().map(|c| c.css()),
                    visible: b.is_alive(),
                })
                .collect(),
            best: ScoreView {
                label: "Best Score".to_string(),
                points: round.score_best.points,
                left: round.score_best.anchor.x,
                top: round.score_best.anchor.y,
            },
            current: ScoreView {
                label: "Current Score".to_string(),
                points: round.score_current.points,
                left: round.score_current.anchor.x,
                top: round.score_current.anchor.y,
            },
            show_play_button: self.phase == ControllerPhase::Paused,
        }
    }

    fn replace_round(&mut self, health: u32, best: u64, current: u64) {
        self.set_phase(ControllerPhase::Transitioning);

        let mut round = Round::new(health, best, current);
        round.paddle.step = self.paddle_step;
        round.paddle.interval = self.paddle_interval;
        self.round = round;

        self.set_phase(ControllerPhase::Running);
    }

    fn set_phase(&mut self, to: ControllerPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn running() -> RoundController {
        let mut controller = RoundController::new();
        controller.play();
        controller.drain_events();
        controller
    }

    #[test]
    fn test_starts_paused() {
        let mut controller = RoundController::new();
        assert_eq!(controller.phase(), ControllerPhase::Paused);
        assert!(controller.snapshot().show_play_button);

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.round().ball.pos, Vec2::new(450.0, 500.0));
    }

    #[test]
    fn test_play_then_tick_moves_ball() {
        let mut controller = RoundController::new();
        controller.play();
        assert_eq!(controller.tick(), Some(Outcome::Continue));
        assert_eq!(controller.round().ball.pos, Vec2::new(455.0, 495.0));
        assert_eq!(controller.ticks(), 1);
    }

    #[test]
    fn test_pause_toggle_and_play_share_state() {
        let mut controller = RoundController::new();

        controller.toggle_pause();
        assert!(controller.is_running());
        // Play while running is a no-op
        controller.play();
        assert!(controller.is_running());

        controller.toggle_pause();
        assert_eq!(controller.phase(), ControllerPhase::Paused);
        controller.play();
        assert!(controller.is_running());

        let events = controller.drain_events();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_failed_rebuilds_level_one() {
        let mut controller = running();
        {
            let round = controller.round_mut();
            round.level = 3;
            round.score_current.points = 40;
            round.score_best.points = 60;
            round.ball.pos = Vec2::new(500.0, 960.0);
            round.ball.vel = Vec2::new(0.0, 5.0);
        }

        assert_eq!(controller.tick(), Some(Outcome::Failed));
        assert!(controller.is_running());

        let round = controller.round();
        assert_eq!(round.level, 1);
        assert!(round.bricks.iter().all(|b| b.health == 1));
        assert_eq!(round.score_current.points, 0);
        assert_eq!(round.score_best.points, 60);
        assert_eq!(round.ball.pos, Vec2::new(450.0, 500.0));

        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::RoundFailed { best: 60 },
                GameEvent::PhaseChanged {
                    from: ControllerPhase::Running,
                    to: ControllerPhase::Transitioning,
                },
                GameEvent::PhaseChanged {
                    from: ControllerPhase::Transitioning,
                    to: ControllerPhase::Running,
                },
            ]
        );
    }

    #[test]
    fn test_win_raises_brick_health() {
        let mut controller = running();
        {
            let round = controller.round_mut();
            round.level = 3;
            round.score_current.points = 250;
            round.score_best.points = 250;
            for brick in &mut round.bricks {
                brick.health = 0;
            }
        }

        assert_eq!(controller.tick(), Some(Outcome::Win));
        assert!(controller.is_running());

        let round = controller.round();
        assert_eq!(round.level, 4);
        assert!(round.bricks.iter().all(|b| b.health == 4));
        assert_eq!(round.score_current.points, 250);
        assert_eq!(round.score_best.points, 250);
        assert!(
            controller
                .drain_events()
                .contains(&GameEvent::LevelCleared { next_health: 4 })
        );
    }

    #[test]
    fn test_command_queue_moves_paddle() {
        let mut controller = RoundController::new();
        controller.push(Command::StartPaddleMove(Direction::Right));
        controller.apply_commands();

        // Paddle timer runs while paused
        assert_eq!(controller.advance_paddle(Duration::from_millis(40)), 1);
        assert_eq!(controller.round().paddle.left(), 430.0);

        controller.push(Command::StopPaddleMove);
        controller.push(Command::StopPaddleMove);
        controller.apply_commands();
        assert_eq!(controller.advance_paddle(Duration::from_millis(400)), 0);
        assert_eq!(controller.round().paddle.left(), 430.0);
    }

    #[test]
    fn test_cadence_survives_round_replacement() {
        let mut controller =
            RoundController::new().with_paddle_cadence(10.0, Duration::from_millis(20));
        controller.play();
        controller.round_mut().ball.pos = Vec2::new(500.0, 990.0);
        controller.tick();

        controller.start_paddle_move(Direction::Left);
        assert_eq!(controller.advance_paddle(Duration::from_millis(40)), 2);
        assert_eq!(controller.round().paddle.left(), 380.0);
    }

    #[test]
    fn test_snapshot_reports_bricks() {
        let mut controller = RoundController::new();
        controller.round_mut().bricks[2].health = 0;
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.bricks.len(), 10);
        assert_eq!(snapshot.bricks[0].color.as_deref(), Some("#e51f1f"));
        assert!(!snapshot.bricks[2].visible);
        assert_eq!(snapshot.bricks[2].color, None);
        assert_eq!(snapshot.best.label, "Best Score");
        assert_eq!(snapshot.current.top, 900.0);
        assert_eq!(snapshot.level, 1);
    }
}
