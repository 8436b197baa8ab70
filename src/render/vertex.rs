//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BALL: [f32; 4] = rgb(0x23, 0xfa, 0xe2);
    pub const BALL_SHADOW: [f32; 4] = rgb(0x21, 0xc2, 0xce);
    pub const PADDLE: [f32; 4] = rgb(0xff, 0xba, 0x08);
    pub const PADDLE_SHADOW: [f32; 4] = rgb(0x66, 0x66, 0x66);
    pub const BRICK_SHADOW: [f32; 4] = rgb(0x00, 0x00, 0x00);

    /// CSS `rgba(...)` string
    pub fn css(color: [f32; 4]) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(color[0]),
            channel(color[1]),
            channel(color[2]),
            color[3].clamp(0.0, 1.0)
        )
    }
}
