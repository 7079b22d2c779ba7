//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport pixel coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

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

/// Axis-aligned rectangle centred on `center`
pub fn rect(center: Vec2, half_size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let min = center - half_size;
    let max = center + half_size;
    quad(
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, max.y),
        color,
    )
}

/// Straight line of the given width from `a` to `b`
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(a + perp, b + perp, a - perp, b - perp, color)
}

/// Two triangles covering `a0 a1 / b0 b1`
fn quad(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a0.x, a0.y, color),
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b0.x, b0.y, color),
        Vertex::new(b0.x, b0.y, color),
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b1.x, b1.y, color),
    ]
}
