//! Presentation adapter
//!
//! The simulation hands out a read-only [`Frame`] per tick. [`draw_frame`]
//! turns it into draw calls on any [`Surface`] (a browser canvas, a vertex
//! mesh), and [`Hud`] carries the text for the score/lives labels and the
//! end-of-run message.

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_CORNER_RADIUS;
use crate::settings::Settings;
use crate::sim::{BrickColor, Circle, GamePhase, GameState, Outcome, Rect};

pub use shapes::MeshSurface;
pub use vertex::{Vertex, colors};

/// A brick as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub active: bool,
    pub color: BrickColor,
}

/// Read-only snapshot of everything drawn in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub arena: Vec2,
    pub paddle: Rect,
    pub ball: Circle,
    /// Row-major
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            arena: state.arena(),
            paddle: state.paddle.rect(),
            ball: state.ball.circle(),
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    rect: b.rect,
                    active: b.is_active(),
                    color: b.color,
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            phase: state.phase,
        }
    }
}

/// On-screen text and controls derived from a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub lives: String,
    /// Empty while the run is in progress
    pub message: &'static str,
    pub show_restart: bool,
}

impl Hud {
    pub const WIN_MESSAGE: &'static str = "You Win! 🏆";
    pub const LOSS_MESSAGE: &'static str = "Game Over 😢 Try Again!";

    pub fn from_frame(frame: &Frame) -> Self {
        let message = match frame.phase.outcome() {
            None => "",
            Some(Outcome::Won) => Self::WIN_MESSAGE,
            Some(Outcome::Lost) => Self::LOSS_MESSAGE,
        };
        Self {
            score: frame.score.to_string(),
            lives: frame.lives.to_string(),
            message,
            show_restart: !frame.phase.is_running(),
        }
    }
}

/// Fill color for a draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Rgba([f32; 4]),
    Hsl(BrickColor),
}

impl Paint {
    pub fn to_rgba(&self) -> [f32; 4] {
        match self {
            Paint::Rgba(rgba) => *rgba,
            Paint::Hsl(color) => color.to_rgba(),
        }
    }

    /// CSS color string for canvas-style surfaces
    pub fn css(&self) -> String {
        match self {
            Paint::Rgba(rgba) => colors::css(*rgba),
            Paint::Hsl(color) => color.css(),
        }
    }
}

/// Soft drop shadow behind filled shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: [f32; 4],
    pub blur: f32,
}

/// A 2D drawing target
pub trait Surface {
    /// Erase everything within `size`
    fn clear(&mut self, size: Vec2);
    /// Global opacity for subsequent fills
    fn set_alpha(&mut self, alpha: f32);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn fill_rect(&mut self, rect: &Rect, paint: Paint);
    fn fill_round_rect(&mut self, rect: &Rect, radius: f32, paint: Paint);
    fn fill_circle(&mut self, circle: &Circle, paint: Paint);
}

/// Drawing options taken from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub shadows: bool,
    pub ended_alpha: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Style {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            shadows: settings.shadows,
            ended_alpha: settings.effective_ended_alpha(),
        }
    }

    fn shadow(&self, color: [f32; 4], blur: f32) -> Option<Shadow> {
        self.shadows.then_some(Shadow { color, blur })
    }
}

/// Clear the surface and draw active bricks, paddle and ball.
/// A finished run is drawn faded.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &Frame, style: &Style) {
    surface.clear(frame.arena);
    surface.set_alpha(if frame.phase.is_running() {
        1.0
    } else {
        style.ended_alpha
    });

    surface.set_shadow(style.shadow(colors::BRICK_SHADOW, 6.0));
    for brick in frame.bricks.iter().filter(|b| b.active) {
        surface.fill_rect(&brick.rect, Paint::Hsl(brick.color));
    }

    surface.set_shadow(style.shadow(colors::PADDLE_SHADOW, 6.0));
    surface.fill_round_rect(&frame.paddle, PADDLE_CORNER_RADIUS, Paint::Rgba(colors::PADDLE));

    surface.set_shadow(style.shadow(colors::BALL_SHADOW, 8.0));
    surface.fill_circle(&frame.ball, Paint::Rgba(colors::BALL));

    surface.set_shadow(None);
    surface.set_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickStatus;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Alpha(f32),
        Shadow(bool),
        Rect,
        RoundRect,
        Circle,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _size: Vec2) {
            self.calls.push(Call::Clear);
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.calls.push(Call::Alpha(alpha));
        }
        fn set_shadow(&mut self, shadow: Option<Shadow>) {
            self.calls.push(Call::Shadow(shadow.is_some()));
        }
        fn fill_rect(&mut self, _rect: &Rect, _paint: Paint) {
            self.calls.push(Call::Rect);
        }
        fn fill_round_rect(&mut self, _rect: &Rect, _radius: f32, _paint: Paint) {
            self.calls.push(Call::RoundRect);
        }
        fn fill_circle(&mut self, _circle: &Circle, _paint: Paint) {
            self.calls.push(Call::Circle);
        }
    }

    impl Recorder {
        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    #[test]
    fn test_draw_skips_destroyed_bricks() {
        let mut state = GameState::new(3);
        state.bricks.get_mut(0, 0).unwrap().status = BrickStatus::Destroyed;
        state.bricks.get_mut(2, 3).unwrap().status = BrickStatus::Destroyed;

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &Frame::capture(&state), &Style::default());

        assert_eq!(surface.calls.first(), Some(&Call::Clear));
        assert_eq!(surface.count(&Call::Rect), 33);
        assert_eq!(surface.count(&Call::RoundRect), 1);
        assert_eq!(surface.count(&Call::Circle), 1);
        assert_eq!(surface.calls[1], Call::Alpha(1.0));
    }

    #[test]
    fn test_ended_frame_is_faded() {
        let mut state = GameState::new(3);
        state.phase.end(Outcome::Lost);

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &Frame::capture(&state), &Style::default());

        assert_eq!(surface.calls[1], Call::Alpha(0.65));
        assert_eq!(surface.calls.last(), Some(&Call::Alpha(1.0)));
    }

    #[test]
    fn test_shadows_can_be_disabled() {
        let state = GameState::new(3);
        let style = Style {
            shadows: false,
            ..Default::default()
        };

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &Frame::capture(&state), &style);

        assert_eq!(surface.count(&Call::Shadow(true)), 0);
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(3);
        state.score = 35;
        state.lives = 2;

        let hud = Hud::from_frame(&Frame::capture(&state));
        assert_eq!(hud.score, "35");
        assert_eq!(hud.lives, "2");
        assert_eq!(hud.message, "");
        assert!(!hud.show_restart);

        state.phase.end(Outcome::Won);
        let hud = Hud::from_frame(&Frame::capture(&state));
        assert_eq!(hud.message, Hud::WIN_MESSAGE);
        assert!(hud.show_restart);

        let mut state = GameState::new(3);
        state.phase.end(Outcome::Lost);
        let hud = Hud::from_frame(&Frame::capture(&state));
        assert_eq!(hud.message, Hud::LOSS_MESSAGE);
    }

    #[test]
    fn test_paint_css() {
        assert_eq!(Paint::Rgba(colors::BALL).css(), "rgba(35, 250, 226, 1)");
        let brick = BrickColor {
            hue: 12,
            saturation: 76,
            lightness: 60,
        };
        assert_eq!(Paint::Hsl(brick).css(), "hsl(12, 76%, 60%)");
    }
}
