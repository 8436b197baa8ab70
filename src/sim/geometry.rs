//! Collision detection and response for axis-aligned geometry
//!
//! Ball-vs-brick and ball-vs-paddle use an approximate test: the ball's
//! center must lie within the rectangle's horizontal span and its vertical
//! extent must overlap the rectangle's. Corners are not resolved.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strictly inside the horizontal span (edges excluded)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }
}

/// A circle (the ball)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }
}

/// Approximate circle/rectangle overlap
pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    rect.spans_x(circle.center.x) && circle.top() < rect.bottom() && circle.bottom() > rect.top()
}

/// Which arena walls the ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Reflect velocity off the left, right and top arena walls
///
/// Each tick the ball overlaps a wall the matching component flips sign,
/// so a ball still overlapping on the next tick flips back. The bottom
/// edge is never a bounce.
pub fn bounce_off_walls(circle: &Circle, velocity: Vec2, arena: Vec2) -> (Vec2, WallContact) {
    let mut vel = velocity;
    let mut contact = WallContact::default();

    if circle.center.x + circle.radius > arena.x {
        vel.x = -vel.x;
        contact.right = true;
    } else if circle.center.x - circle.radius < 0.0 {
        vel.x = -vel.x;
        contact.left = true;
    }

    if circle.top() < 0.0 {
        vel.y = -vel.y;
        contact.top = true;
    }

    (vel, contact)
}

/// Horizontal velocity after a paddle hit, proportional to the offset from
/// the paddle's center
#[inline]
pub fn paddle_deflection(ball_x: f32, paddle: &Rect, coefficient: f32) -> f32 {
    (ball_x - paddle.center_x()) * coefficient
}
