//! Game state and core simulation types
//!
//! Everything the simulation mutates is owned by `GameState`. Hosts read it
//! through `render::Frame` snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use super::phase::{GamePhase, Outcome};
use crate::consts::*;
use crate::tuning::Tuning;

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Speed magnitude applied while a direction is held
    pub speed: f32,
    /// Current horizontal velocity (pixels per tick)
    pub dx: f32,
}

impl Paddle {
    pub fn new(arena: Vec2, speed: f32) -> Self {
        let mut paddle = Self {
            pos: Vec2::new(0.0, arena.y - PADDLE_BOTTOM_GAP),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed,
            dx: 0.0,
        };
        paddle.recenter(arena.x);
        paddle
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Rightmost legal x for the paddle's left edge
    #[inline]
    pub fn max_x(&self, arena_width: f32) -> f32 {
        (arena_width - self.size.x).max(0.0)
    }

    pub fn clamp_to(&mut self, arena_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, self.max_x(arena_width));
    }

    pub fn recenter(&mut self, arena_width: f32) {
        self.pos.x = arena_width / 2.0 - self.size.x / 2.0;
    }

    /// Center the paddle on an absolute x (pointer position), clamped
    pub fn center_on(&mut self, x: f32, arena_width: f32) {
        if !x.is_finite() {
            return;
        }
        self.pos.x = x - self.size.x / 2.0;
        self.clamp_to(arena_width);
    }

    /// Apply velocity for one tick, clamped to the arena
    pub fn advance(&mut self, arena_width: f32) {
        self.pos.x += self.dx;
        self.clamp_to(arena_width);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed used at serve (per axis)
    pub speed: f32,
}

impl Ball {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Place at `start` heading up, horizontal sign from `rightward`
    pub fn serve(&mut self, start: Vec2, rightward: bool) {
        let sign = if rightward { 1.0 } else { -1.0 };
        self.pos = start;
        self.vel = Vec2::new(self.speed * sign, -self.speed);
    }
}

/// Brick status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickStatus {
    #[default]
    Active,
    Destroyed,
}

/// Cosmetic brick color in HSL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickColor {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl BrickColor {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            hue: rng.random_range(0..BRICK_HUE_RANGE),
            saturation: BRICK_SATURATION,
            lightness: BRICK_LIGHTNESS,
        }
    }

    /// CSS color string, e.g. `hsl(120, 76%, 60%)`
    pub fn css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }

    /// Linear RGBA in [0, 1]
    pub fn to_rgba(&self) -> [f32; 4] {
        let s = self.saturation as f32 / 100.0;
        let l = self.lightness as f32 / 100.0;
        let h = (self.hue % 360) as f32 / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, 1.0]
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub status: BrickStatus,
    pub color: BrickColor,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Grid geometry shared by every brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickLayout {
    pub rows: usize,
    pub cols: usize,
    pub brick_size: Vec2,
    pub padding: f32,
    pub offset: Vec2,
}

impl BrickLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            padding: BRICK_PADDING,
            offset: Vec2::new(BRICK_OFFSET_LEFT, BRICK_OFFSET_TOP),
        }
    }

    pub fn brick_rect(&self, row: usize, col: usize) -> Rect {
        let x = col as f32 * (self.brick_size.x + self.padding) + self.offset.x;
        let y = row as f32 * (self.brick_size.y + self.padding) + self.offset.y;
        Rect {
            pos: Vec2::new(x, y),
            size: self.brick_size,
        }
    }
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self::new(BRICK_ROWS, BRICK_COLS)
    }
}

/// Row-major grid of bricks, fixed size for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub layout: BrickLayout,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Fresh grid, every brick active with a random color
    pub fn new(layout: BrickLayout, rng: &mut impl Rng) -> Self {
        let mut bricks = Vec::with_capacity(layout.rows * layout.cols);
        for row in 0..layout.rows {
            for col in 0..layout.cols {
                bricks.push(Brick {
                    row,
                    col,
                    rect: layout.brick_rect(row, col),
                    status: BrickStatus::Active,
                    color: BrickColor::random(rng),
                });
            }
        }
        Self { layout, bricks }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.layout.rows || col >= self.layout.cols {
            return None;
        }
        self.bricks.get(row * self.layout.cols + col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        if row >= self.layout.rows || col >= self.layout.cols {
            return None;
        }
        self.bricks.get_mut(row * self.layout.cols + col)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_active()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_active())
    }
}

/// Things that happened during a tick, for HUD updates and sound hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    /// Ball deflected by the paddle with the resulting dx
    PaddleHit { dx: f32 },
    BrickDestroyed { row: usize, col: usize },
    LifeLost { remaining: u8 },
    Ended(Outcome),
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter (not reset by restart)
    pub time_ticks: u64,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = tuning.arena();
        let bricks = BrickGrid::new(
            BrickLayout::new(tuning.brick_rows, tuning.brick_cols),
            &mut rng,
        );

        let mut state = Self {
            seed,
            rng,
            paddle: Paddle::new(arena, tuning.paddle_speed),
            ball: Ball::new(tuning.ball_speed),
            bricks,
            score: 0,
            lives: tuning.starting_lives,
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        state.reset_ball();
        state
    }

    #[inline]
    pub fn arena(&self) -> Vec2 {
        self.tuning.arena()
    }

    /// Serve position: horizontally centered, near the bottom
    pub fn ball_start(&self) -> Vec2 {
        let arena = self.arena();
        Vec2::new(arena.x / 2.0, arena.y - BALL_START_BOTTOM_GAP)
    }

    /// Serve the ball from the start position with a random horizontal
    /// direction. Also recenters the paddle.
    pub fn reset_ball(&mut self) {
        let start = self.ball_start();
        let rightward = self.rng.random_bool(0.5);
        self.ball.serve(start, rightward);
        self.paddle.recenter(self.arena().x);
    }

    /// Regenerate the whole brick grid, all active with fresh colors
    pub fn init_bricks(&mut self) {
        let layout = self.bricks.layout.clone();
        self.bricks = BrickGrid::new(layout, &mut self.rng);
    }

    /// Reset score, lives and bricks, serve a new ball and resume running
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.phase.restart();
        self.init_bricks();
        self.reset_ball();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted (seed {})", self.seed);
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
