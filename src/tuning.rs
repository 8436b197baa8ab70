//! Data-driven game balance
//!
//! Defaults reproduce the classic layout; any field may be overridden from
//! the settings JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tunables for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Paddle speed in pixels per tick while a direction key is held
    pub paddle_speed: f32,
    /// Ball speed in pixels per tick along each axis at serve
    pub ball_speed: f32,
    /// Paddle hit deflection coefficient
    pub paddle_deflection: f32,
    pub starting_lives: u8,
    pub brick_rows: usize,
    pub brick_cols: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            paddle_deflection: PADDLE_DEFLECTION,
            starting_lives: STARTING_LIVES,
            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
        }
    }
}

impl Tuning {
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let canvas_fits = self.canvas_width.is_finite()
            && self.canvas_width >= PADDLE_WIDTH
            && self.canvas_height.is_finite()
            && self.canvas_height > PADDLE_BOTTOM_GAP * 2.0;
        if !canvas_fits {
            log::warn!(
                "Canvas {}x{} too small, using {}x{}",
                self.canvas_width,
                self.canvas_height,
                defaults.canvas_width,
                defaults.canvas_height
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
        }
        if self.ball_speed.is_nan() || self.ball_speed <= 0.0 {
            log::warn!(
                "Ball speed {} must be positive, using {}",
                self.ball_speed,
                defaults.ball_speed
            );
            self.ball_speed = defaults.ball_speed;
        }
        if self.paddle_speed.is_nan() || self.paddle_speed < 0.0 {
            log::warn!(
                "Paddle speed {} must not be negative, using {}",
                self.paddle_speed,
                defaults.paddle_speed
            );
            self.paddle_speed = defaults.paddle_speed;
        }
        if !self.paddle_deflection.is_finite() {
            self.paddle_deflection = defaults.paddle_deflection;
        }
        if self.starting_lives == 0 {
            log::warn!("Starting lives must be at least 1, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            log::warn!(
                "Empty brick grid {}x{}, using {}x{}",
                self.brick_rows,
                self.brick_cols,
                defaults.brick_rows,
                defaults.brick_cols
            );
            self.brick_rows = defaults.brick_rows;
            self.brick_cols = defaults.brick_cols;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_untouched_by_sanitize() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_sanitize_fixes_bad_values() {
        let tuning = Tuning {
            ball_speed: 0.0,
            paddle_speed: f32::NAN,
            starting_lives: 0,
            brick_cols: 0,
            canvas_width: 10.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.ball_speed, BALL_SPEED);
        assert_eq!(tuning.paddle_speed, PADDLE_SPEED);
        assert_eq!(tuning.starting_lives, STARTING_LIVES);
        assert_eq!(tuning.brick_cols, BRICK_COLS);
        assert_eq!(tuning.canvas_width, CANVAS_WIDTH);
    }

    #[test]
    fn test_sanitize_rejects_non_finite() {
        let tuning = Tuning {
            ball_speed: f32::NAN,
            canvas_height: f32::INFINITY,
            paddle_speed: -1.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.ball_speed, BALL_SPEED);
        assert_eq!(tuning.paddle_speed, PADDLE_SPEED);
        assert_eq!(tuning.canvas_height, CANVAS_HEIGHT);
        assert_eq!(tuning.canvas_width, CANVAS_WIDTH);
    }
}
