//! Shape generation for 2D primitives
//!
//! Tessellates draw calls into triangle lists so a GPU host can draw a
//! [`Frame`](super::Frame) without a canvas API.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use super::{Paint, Shadow, Surface};
use crate::sim::{Circle, Rect};

/// Default circle segment count
pub const CIRCLE_SEGMENTS: u32 = 24;
/// Segments per rounded corner
pub const CORNER_SEGMENTS: u32 = 6;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle with rounded corners
///
/// The corner radius is limited to half the shorter side.
pub fn round_rect(rect: &Rect, radius: f32, color: [f32; 4], corner_segments: u32) -> Vec<Vertex> {
    let radius = radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0).max(0.0);
    let corner_segments = corner_segments.max(1);

    // Corner centers clockwise from top-right (y grows downward)
    let corners = [
        (Vec2::new(rect.right() - radius, rect.top() + radius), -FRAC_PI_2),
        (Vec2::new(rect.right() - radius, rect.bottom() - radius), 0.0),
        (Vec2::new(rect.left() + radius, rect.bottom() - radius), FRAC_PI_2),
        (Vec2::new(rect.left() + radius, rect.top() + radius), PI),
    ];

    let mut outline = Vec::with_capacity((4 * (corner_segments + 1)) as usize);
    for (center, start) in corners {
        for i in 0..=corner_segments {
            let theta = start + (i as f32 / corner_segments as f32) * FRAC_PI_2;
            outline.push(center + Vec2::new(theta.cos(), theta.sin()) * radius);
        }
    }

    // Convex outline: fan from the center
    let center = rect.pos + rect.size / 2.0;
    let mut vertices = Vec::with_capacity(outline.len() * 3);
    for (i, p1) in outline.iter().enumerate() {
        let p2 = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// A [`Surface`] that collects triangles instead of drawing
///
/// Shadows are not tessellated; global alpha multiplies vertex alpha.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    pub vertices: Vec<Vertex>,
    alpha: f32,
    circle_segments: u32,
}

impl Default for MeshSurface {
    fn default() -> Self {
        Self::new(CIRCLE_SEGMENTS)
    }
}

impl MeshSurface {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            alpha: 1.0,
            circle_segments: circle_segments.max(3),
        }
    }

    fn color(&self, paint: Paint) -> [f32; 4] {
        let mut color = paint.to_rgba();
        color[3] *= self.alpha;
        color
    }
}

impl Surface for MeshSurface {
    fn clear(&mut self, _size: Vec2) {
        self.vertices.clear();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_shadow(&mut self, _shadow: Option<Shadow>) {}

    fn fill_rect(&mut self, r: &Rect, paint: Paint) {
        let color = self.color(paint);
        self.vertices.extend(rect(r, color));
    }

    fn fill_round_rect(&mut self, r: &Rect, radius: f32, paint: Paint) {
        let color = self.color(paint);
        self.vertices.extend(round_rect(r, radius, color, CORNER_SEGMENTS));
    }

    fn fill_circle(&mut self, c: &Circle, paint: Paint) {
        let color = self.color(paint);
        self.vertices.extend(circle(c.center, c.radius, color, self.circle_segments));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Frame, Style, colors, draw_frame};
    use crate::sim::{GameState, Outcome};

    #[test]
    fn test_rect_corners() {
        let vertices = rect(&Rect::new(10.0, 20.0, 30.0, 5.0), colors::PADDLE);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[5].position, [40.0, 25.0]);
    }

    #[test]
    fn test_round_rect_stays_inside() {
        let r = Rect::new(175.0, 460.0, 70.0, 12.0);
        let vertices = round_rect(&r, 10.0, colors::PADDLE, 4);
        assert_eq!(vertices.len(), 4 * 5 * 3);
        for v in &vertices {
            assert!(v.position[0] >= r.left() - 0.001 && v.position[0] <= r.right() + 0.001);
            assert!(v.position[1] >= r.top() - 0.001 && v.position[1] <= r.bottom() + 0.001);
        }
    }

    #[test]
    fn test_mesh_surface_frame() {
        let state = GameState::new(8);
        let mut mesh = MeshSurface::new(16);
        draw_frame(&mut mesh, &Frame::capture(&state), &Style::default());

        let bricks = 35 * 6;
        let paddle = 4 * (CORNER_SEGMENTS as usize + 1) * 3;
        let ball = 16 * 3;
        assert_eq!(mesh.vertices.len(), bricks + paddle + ball);
        assert!(mesh.vertices.iter().all(|v| v.color[3] == 1.0));
    }

    #[test]
    fn test_mesh_surface_fades_ended_frame() {
        let mut state = GameState::new(8);
        state.phase.end(Outcome::Won);
        let mut mesh = MeshSurface::default();
        draw_frame(&mut mesh, &Frame::capture(&state), &Style::default());

        assert!(!mesh.vertices.is_empty());
        assert!(
            mesh.vertices
                .iter()
                .all(|v| (v.color[3] - 0.65).abs() < 0.0001)
        );
    }
}
