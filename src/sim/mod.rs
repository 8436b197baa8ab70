//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Row-major brick iteration
//! - No rendering or platform dependencies

pub mod geometry;
pub mod phase;
pub mod state;
pub mod tick;

pub use geometry::{
    Circle, Rect, WallContact, bounce_off_walls, circle_intersects_rect, paddle_deflection,
};
pub use phase::{GamePhase, Outcome};
pub use state::{
    Ball, Brick, BrickColor, BrickGrid, BrickLayout, BrickStatus, GameEvent, GameState, Paddle,
};
pub use tick::{PaddleDirection, TickInput, tick};
