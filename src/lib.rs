//! Brick Breaker - a single-screen paddle and bricks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, tick, game phase)
//! - `game`: Host-facing controller (input intents, restart, frame scheduling)
//! - `render`: Presentation adapter (frame snapshots, draw calls, HUD text)
//! - `settings` / `tuning`: Data-driven configuration and game balance
//! - `autopilot`: Simple ball-tracking paddle for demos

pub mod autopilot;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions (the brick grid spans x in [17, 419])
    pub const CANVAS_WIDTH: f32 = 420.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 70.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Distance from the canvas bottom to the paddle top
    pub const PADDLE_BOTTOM_GAP: f32 = 20.0;
    /// Horizontal speed in pixels per tick
    pub const PADDLE_SPEED: f32 = 7.0;
    pub const PADDLE_CORNER_RADIUS: f32 = 10.0;
    /// Ball dx per pixel of offset from the paddle center on a paddle hit
    pub const PADDLE_DEFLECTION: f32 = 0.18;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Speed in pixels per tick (per axis at serve)
    pub const BALL_SPEED: f32 = 1.0;
    /// Distance from the canvas bottom to the ball's serve position
    pub const BALL_START_BOTTOM_GAP: f32 = 32.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 7;
    pub const BRICK_WIDTH: f32 = 48.0;
    pub const BRICK_HEIGHT: f32 = 15.0;
    pub const BRICK_PADDING: f32 = 11.0;
    pub const BRICK_OFFSET_TOP: f32 = 28.0;
    pub const BRICK_OFFSET_LEFT: f32 = 17.0;

    /// Brick colors are hsl(hue, 76%, 60%) with hue drawn from [0, 350)
    pub const BRICK_HUE_RANGE: u16 = 350;
    pub const BRICK_SATURATION: u8 = 76;
    pub const BRICK_LIGHTNESS: u8 = 60;

    /// Points per destroyed brick
    pub const BRICK_SCORE: u64 = 5;
    pub const STARTING_LIVES: u8 = 3;
}
