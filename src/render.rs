//! Draw commands handed to an external renderer.

use crate::types::Vec2;

/// An RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A filled circle centred on the command's position.
    Point { radius: f64 },
    /// An axis-aligned rectangle anchored at the command's position.
    Quad { size: Vec2 },
}

/// A single shape to be drawn this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub position: Vec2,
    pub shape: Shape,
    pub color: Color,
}

impl DrawCommand {
    pub fn point(position: Vec2, radius: f64, color: Color) -> Self {
        Self {
            position,
            shape: Shape::Point { radius },
            color,
        }
    }

    pub fn quad(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            position,
            shape: Shape::Quad { size },
            color,
        }
    }
}
