//! Fixed step simulation tick
//!
//! Core game loop that advances the simulation by exactly one frame.

use serde::{Deserialize, Serialize};

use super::geometry::{bounce_off_walls, circle_intersects_rect, paddle_deflection};
use super::phase::Outcome;
use super::state::{BrickStatus, GameEvent, GameState};
use crate::consts::BRICK_SCORE;

/// Held direction from discrete key edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    Left,
    Right,
    #[default]
    None,
}

impl PaddleDirection {
    /// Sign applied to the paddle speed
    pub fn sign(&self) -> f32 {
        match self {
            PaddleDirection::Left => -1.0,
            PaddleDirection::Right => 1.0,
            PaddleDirection::None => 0.0,
        }
    }
}

/// Input intents for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Keyboard velocity intent
    pub direction: PaddleDirection,
    /// Absolute pointer x to center the paddle on
    pub target_x: Option<f32>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.phase.is_running() {
        return;
    }

    state.time_ticks += 1;

    move_paddle(state, input);
    move_ball(state);

    resolve_paddle(state);
    collide_bricks(state);

    if state.bricks.all_destroyed() && state.phase.end(Outcome::Won) {
        state.events.push(GameEvent::Ended(Outcome::Won));
        log::info!("All bricks cleared, final score {}", state.score);
    }
}

fn move_paddle(state: &mut GameState, input: &TickInput) {
    let arena_width = state.arena().x;
    let paddle = &mut state.paddle;

    if let Some(x) = input.target_x {
        paddle.center_on(x, arena_width);
    }
    paddle.dx = paddle.speed * input.direction.sign();
    paddle.advance(arena_width);
}

fn move_ball(state: &mut GameState) {
    let arena = state.arena();
    let ball = &mut state.ball;

    ball.pos += ball.vel;

    let (vel, contact) = bounce_off_walls(&ball.circle(), ball.vel, arena);
    ball.vel = vel;
    if contact.any() {
        state.events.push(GameEvent::WallBounce);
    }
}

/// Paddle deflection, or a miss once the ball has left the canvas
///
/// A ball below the paddle line but not over the paddle only counts as a
/// miss after it also passes the canvas bottom. The last miss leaves the
/// ball where it is; the brick pass of the same tick still runs.
fn resolve_paddle(state: &mut GameState) {
    let paddle = state.paddle.rect();
    if state.ball.bottom() <= paddle.top() {
        return;
    }

    if paddle.spans_x(state.ball.pos.x) {
        let ball = &mut state.ball;
        ball.vel.y = -ball.vel.y;
        ball.vel.x = paddle_deflection(ball.pos.x, &paddle, state.tuning.paddle_deflection);
        log::debug!("Paddle hit at x {:.1}, dx {:.2}", ball.pos.x, ball.vel.x);
        state.events.push(GameEvent::PaddleHit { dx: ball.vel.x });
        return;
    }

    if state.ball.bottom() > state.arena().y {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        log::debug!("Ball lost, {} lives remaining", state.lives);

        if state.lives == 0 {
            if state.phase.end(Outcome::Lost) {
                state.events.push(GameEvent::Ended(Outcome::Lost));
                log::info!("Out of lives, final score {}", state.score);
            }
        } else {
            state.reset_ball();
        }
    }
}

/// Every overlapping active brick is destroyed and flips the ball's
/// vertical direction on its own, so two hits in one tick cancel out.
fn collide_bricks(state: &mut GameState) {
    let circle = state.ball.circle();

    for brick in state.bricks.iter_mut() {
        if !brick.is_active() || !circle_intersects_rect(&circle, &brick.rect) {
            continue;
        }
        state.ball.vel.y = -state.ball.vel.y;
        brick.status = BrickStatus::Destroyed;
        state.score += BRICK_SCORE;
        state.events.push(GameEvent::BrickDestroyed {
            row: brick.row,
            col: brick.col,
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::{GamePhase, Rect};

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Destroy every brick except (row, col)
    fn leave_one_brick(state: &mut GameState, row: usize, col: usize) {
        for brick in state.bricks.iter_mut() {
            if brick.row != row || brick.col != col {
                brick.status = BrickStatus::Destroyed;
            }
        }
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let mut state = GameState::new(1);
        let input = TickInput {
            direction: PaddleDirection::Right,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.pos.x, 182.0);
        assert_eq!(state.paddle.dx, 7.0);

        for _ in 0..100 {
            tick(&mut state, &input);
        }
        assert_eq!(state.paddle.pos.x, 350.0);

        let input = TickInput {
            direction: PaddleDirection::None,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.dx, 0.0);
        assert_eq!(state.paddle.pos.x, 350.0);
    }

    #[test]
    fn test_pointer_target_is_clamped() {
        let mut state = GameState::new(1);
        let input = TickInput {
            target_x: Some(-200.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.pos.x, 0.0);

        let input = TickInput {
            target_x: Some(300.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.pos.x, 265.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(420.0 - 8.0 + 1.0, 300.0);
        state.ball.vel = Vec2::new(1.0, -1.0);

        tick(&mut state, &idle());
        assert_eq!(state.ball.vel.x, -1.0);

        // Still overlapping the wall, so the sign flips back
        tick(&mut state, &idle());
        assert_eq!(state.ball.pos.x, 413.0);
        assert_eq!(state.ball.vel.x, 1.0);
        assert!(state.events.contains(&GameEvent::WallBounce));
    }

    #[test]
    fn test_paddle_deflection_against_wall_shakes() {
        let mut state = GameState::new(1);
        state.paddle.pos.x = 350.0;
        state.ball.pos = Vec2::new(411.0, 452.0);
        state.ball.vel = Vec2::new(2.0, 1.0);

        let mut trace = Vec::new();
        for _ in 0..4 {
            tick(&mut state, &idle());
            trace.push((state.ball.pos.x, state.ball.vel.x));
        }

        let dx = (413.0 - 385.0) * 0.18;
        let expected = [(413.0, dx), (413.0 + dx, -dx), (413.0, dx), (413.0 + dx, -dx)];
        for ((x, vx), (ex, evx)) in trace.iter().zip(expected) {
            assert!((x - ex).abs() < 0.001, "x {} != {}", x, ex);
            assert!((vx - evx).abs() < 0.001, "dx {} != {}", vx, evx);
        }
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(210.0, 453.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert!(state.ball.vel.x.abs() < 0.0001);
        assert_eq!(state.ball.vel.y, -1.0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_paddle_offset_hit_deflects() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(230.0, 453.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert!((state.ball.vel.x - 20.0 * 0.18).abs() < 0.0001);
        assert_eq!(state.ball.vel.y, -1.0);
    }

    #[test]
    fn test_no_miss_between_paddle_line_and_bottom() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(400.0, 455.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 3);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 456.0));
        assert_eq!(state.ball.vel.y, 1.0);
    }

    #[test]
    fn test_miss_loses_life_and_resets() {
        let mut state = GameState::new(1);
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 472.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 2);
        assert!(state.is_running());
        assert_eq!(state.ball.pos, state.ball_start());
        assert_eq!(state.ball.vel.y, -1.0);
        assert_eq!(state.paddle.pos.x, 175.0);
        assert!(state.events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }

    #[test]
    fn test_last_life_ends_and_freezes() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.score = 40;
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 472.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));
        assert!(state.events.contains(&GameEvent::Ended(Outcome::Lost)));

        let frozen_ball = state.ball.clone();
        let ticks = state.time_ticks;
        tick(
            &mut state,
            &TickInput {
                direction: PaddleDirection::Right,
                ..Default::default()
            },
        );
        assert_eq!(state.ball, frozen_ball);
        assert_eq!(state.paddle.pos.x, 0.0);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_brick_pass_runs_on_losing_tick() {
        let mut state = GameState::new(1);
        state.lives = 1;
        state.paddle.pos.x = 0.0;
        // A brick low enough to touch a ball leaving the canvas
        state.bricks.get_mut(4, 6).unwrap().rect = Rect::new(390.0, 470.0, 20.0, 15.0);
        state.ball.pos = Vec2::new(400.0, 472.0);
        state.ball.vel = Vec2::new(0.0, 1.0);

        tick(&mut state, &idle());

        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));
        assert_eq!(state.score, 5);
        assert!(!state.bricks.get(4, 6).unwrap().is_active());
        assert_eq!(state.ball.vel.y, -1.0);
        assert!(!state.events.contains(&GameEvent::Ended(Outcome::Won)));
    }

    #[test]
    fn test_brick_hit_scores_and_flips() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(40.0, 46.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        tick(&mut state, &idle());

        assert_eq!(state.score, 5);
        assert_eq!(state.ball.vel.y, 1.0);
        assert_eq!(state.bricks.get(0, 0).unwrap().status, BrickStatus::Destroyed);
        assert_eq!(state.bricks.active_count(), 34);
        assert!(state.is_running());
    }

    #[test]
    fn test_two_bricks_in_one_tick_flip_twice() {
        let mut state = GameState::new(1);
        // Ball straddles the gap between rows 0 and 1 of column 0
        state.ball.pos = Vec2::new(40.0, 49.5);
        state.ball.vel = Vec2::new(0.0, -1.0);

        tick(&mut state, &idle());

        assert_eq!(state.score, 10);
        assert_eq!(state.ball.vel.y, -1.0);
        assert!(!state.bricks.get(0, 0).unwrap().is_active());
        assert!(!state.bricks.get(1, 0).unwrap().is_active());
    }

    #[test]
    fn test_destroyed_bricks_are_ignored() {
        let mut state = GameState::new(1);
        state.bricks.get_mut(0, 0).unwrap().status = BrickStatus::Destroyed;
        state.ball.pos = Vec2::new(40.0, 46.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        tick(&mut state, &idle());

        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel.y, -1.0);
    }

    #[test]
    fn test_all_but_one_destroyed_keeps_running() {
        let mut state = GameState::new(1);
        leave_one_brick(&mut state, 4, 6);

        tick(&mut state, &idle());

        assert!(state.is_running());
        assert_eq!(state.bricks.active_count(), 1);
    }

    #[test]
    fn test_last_brick_wins_same_tick() {
        let mut state = GameState::new(1);
        leave_one_brick(&mut state, 0, 0);
        state.score = 170;
        state.ball.pos = Vec2::new(40.0, 46.0);
        state.ball.vel = Vec2::new(0.0, -1.0);

        tick(&mut state, &idle());

        assert_eq!(state.score, 175);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Won));
        let events = state.drain_events();
        let destroyed = events
            .iter()
            .position(|e| matches!(e, GameEvent::BrickDestroyed { .. }));
        let won = events
            .iter()
            .position(|e| *e == GameEvent::Ended(Outcome::Won));
        assert!(destroyed.unwrap() < won.unwrap());
    }
}
