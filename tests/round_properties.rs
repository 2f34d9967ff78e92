use std::time::Duration;

use brickfall::consts::*;
use brickfall::platform::{NullAudio, Renderer, Session};
use brickfall::sim::collision::{detect_brick_collision, detect_wall_collision};
use brickfall::sim::state::{BEST_SCORE_ANCHOR, CURRENT_SCORE_ANCHOR};
use brickfall::sim::*;
use brickfall::{KeyBindings, paddle_left_range};
use glam::Vec2;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Start(Direction),
    Stop,
    TogglePause,
    AdvancePaddle(u64),
    Teleport(f32, f32, f32, f32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Tick),
        1 => prop_oneof![Just(Direction::Left), Just(Direction::Right)].prop_map(Op::Start),
        1 => Just(Op::Stop),
        1 => Just(Op::TogglePause),
        2 => (0u64..500).prop_map(Op::AdvancePaddle),
        1 => (0f32..1000.0, 0f32..1000.0, -8f32..8.0, -8f32..8.0)
            .prop_map(|(x, y, vx, vy)| Op::Teleport(x, y, vx, vy)),
    ]
}

fn apply(controller: &mut RoundController, op: &Op) {
    match *op {
        Op::Tick => {
            controller.tick();
        }
        Op::Start(direction) => controller.start_paddle_move(direction),
        Op::Stop => controller.stop_paddle_move(),
        Op::TogglePause => controller.toggle_pause(),
        Op::AdvancePaddle(ms) => {
            controller.advance_paddle(Duration::from_millis(ms));
        }
        Op::Teleport(x, y, vx, vy) => {
            let ball = &mut controller.round_mut().ball;
            ball.pos = Vec2::new(x, y);
            ball.vel = Vec2::new(vx, vy);
        }
    }
}

proptest! {
    #[test]
    fn best_score_never_decreases(ops in prop::collection::vec(op(), 1..300)) {
        let mut controller = RoundController::new();
        controller.play();
        let mut best = controller.round().score_best.points;

        for op in &ops {
            apply(&mut controller, op);
            let now = controller.round().score_best.points;
            prop_assert!(now >= best, "best went {} -> {} after {:?}", best, now, op);
            prop_assert!(now >= controller.round().score_current.points);
            best = now;
        }
    }

    #[test]
    fn paddle_stays_in_playable_range(ops in prop::collection::vec(op(), 1..300)) {
        let mut controller = RoundController::new();
        let (min, max) = paddle_left_range(BORDER_THICKNESS, PADDLE_WIDTH);

        for op in &ops {
            apply(&mut controller, op);
            let left = controller.round().paddle.left();
            prop_assert!((min..=max).contains(&left), "left {} after {:?}", left, op);
        }
    }

    #[test]
    fn impact_angle_is_monotonic_and_bounded(a in 0f32..=1.0, b in 0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(impact_angle(lo) <= impact_angle(hi));
        let limit = MAX_BOUNCE_ANGLE_DEG.to_radians() + 1e-6;
        prop_assert!(impact_angle(a).abs() <= limit);
    }

    #[test]
    fn exhausted_bricks_are_inert(x in 0f32..1000.0, y in 0f32..1000.0) {
        let mut round = Round::new(1, 0, 0);
        for brick in &mut round.bricks {
            brick.health = 0;
        }
        round.bricks[4].health = 2;
        let before: Vec<_> = round.bricks.iter().map(|b| (b.pos, b.health)).collect();
        round.ball.pos = Vec2::new(x, y);

        let mut events = Vec::new();
        detect_brick_collision(
            &mut round.ball,
            &mut round.bricks,
            &mut round.score_current,
            &mut round.score_best,
            &mut events,
        );

        for (i, (brick, (pos, health))) in round.bricks.iter().zip(before).enumerate() {
            prop_assert_eq!(brick.pos, pos);
            if i != 4 {
                prop_assert_eq!(brick.health, health);
            }
        }
    }

    #[test]
    fn win_iff_no_brick_left(
        healths in prop::collection::vec(0u32..3, 10),
        x in 0f32..1000.0,
        y in 0f32..300.0,
    ) {
        let mut bricks: Vec<Brick> = healths
            .iter()
            .enumerate()
            .map(|(i, &h)| Brick::new(75.0 + 90.0 * i as f32, 90.0, h))
            .collect();
        let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(5.0, -5.0));
        let mut current = Score::new(CURRENT_SCORE_ANCHOR, 0);
        let mut best = Score::new(BEST_SCORE_ANCHOR, 0);

        let outcome =
            detect_brick_collision(&mut ball, &mut bricks, &mut current, &mut best, &mut Vec::new());

        let all_down = bricks.iter().all(|b| b.health == 0);
        prop_assert_eq!(outcome == Outcome::Win, all_down);
    }

    #[test]
    fn failed_iff_past_bottom(y in 0f32..1100.0, points in 0u64..1000) {
        let mut ball = Ball::new(Vec2::new(500.0, y), Vec2::new(5.0, 5.0));
        let mut current = Score::new(CURRENT_SCORE_ANCHOR, points);

        let outcome = detect_wall_collision(&mut ball, BORDER_THICKNESS, &mut current, &mut Vec::new());

        let past = y + BALL_RADIUS > ARENA_SIZE - BORDER_THICKNESS;
        prop_assert_eq!(outcome == Outcome::Failed, past);
        if past {
            prop_assert_eq!(current.points, 0);
        } else {
            prop_assert_eq!(current.points, points);
        }
    }
}

#[test]
fn opening_shot_breaks_ninth_brick() {
    // From (450, 500) at (5, -5) the ball first touches the brick row after
    // 73 ticks, over the brick at left = 795.
    let mut controller = RoundController::new();
    controller.play();
    for _ in 0..72 {
        assert_eq!(controller.tick(), Some(Outcome::Continue));
    }
    assert!(controller.round().bricks.iter().all(|b| b.health == 1));

    assert_eq!(controller.tick(), Some(Outcome::Continue));
    let round = controller.round();
    assert_eq!(round.bricks[8].health, 0);
    assert_eq!(round.remaining_bricks(), 9);
    assert_eq!(round.score_current.points, 10);
    assert_eq!(round.score_best.points, 10);
    assert_eq!(round.ball.vel, Vec2::new(5.0, 5.0));
}

#[test]
fn clearing_every_brick_wins_despite_other_hits() {
    let mut controller = RoundController::new();
    controller.play();
    {
        let round = controller.round_mut();
        for brick in &mut round.bricks {
            brick.health = 0;
        }
        // Next position overlaps the paddle and sits past the bottom border
        round.ball.pos = Vec2::new(470.0, 960.0);
        round.ball.vel = Vec2::new(5.0, 5.0);
        round.paddle.pos = Vec2::new(400.0, 950.0);
    }

    assert_eq!(controller.tick(), Some(Outcome::Win));
    assert_eq!(controller.level(), 2);
}

#[test]
fn stop_twice_matches_stop_once() {
    let mut once = RoundController::new();
    let mut twice = RoundController::new();
    for c in [&mut once, &mut twice] {
        c.start_paddle_move(Direction::Left);
        c.advance_paddle(Duration::from_millis(120));
    }

    once.stop_paddle_move();
    twice.stop_paddle_move();
    twice.stop_paddle_move();

    assert_eq!(once.snapshot(), twice.snapshot());
}

struct Discard;

impl Renderer for Discard {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

#[test]
fn autopilot_session_keeps_invariants() {
    let mut session = Session::new(RoundController::new(), Discard, NullAudio, KeyBindings::default());
    let mut pilot = Autopilot::new(3);
    let (min, max) = paddle_left_range(BORDER_THICKNESS, PADDLE_WIDTH);
    let mut best = 0;

    for _ in 0..5000 {
        if let Some(command) = pilot.decide(session.controller()) {
            session.send(command);
        }
        session.frame(Duration::from_micros(16_667));

        let round = session.controller().round();
        assert!((min..=max).contains(&round.paddle.left()));
        assert!(round.score_best.points >= best);
        assert!(round.score_best.points >= round.score_current.points);
        best = round.score_best.points;
    }

    assert!(session.stats().ticks > 4900);
    assert!(session.controller().is_running());
}
