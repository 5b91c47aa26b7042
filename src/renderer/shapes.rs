//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixel coordinates.

use super::vertex::Vertex;
use crate::sim::Rect;

/// Outline thickness in pixels
pub const OUTLINE_WIDTH: f32 = 1.0;

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, r.left(), r.top(), r.right(), r.bottom(), color);
    vertices
}

/// Generate vertices for a hollow rectangle (four thin bars)
pub fn rect_outline(r: &Rect, color: [f32; 4], width: f32) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let w = width.min(r.size.x / 2.0).min(r.size.y / 2.0);

    let mut vertices = Vec::with_capacity(24);
    // Top and bottom span the full width, sides fill the gap between them
    push_rect(&mut vertices, l, t, rt, t + w, color);
    push_rect(&mut vertices, l, b - w, rt, b, color);
    push_rect(&mut vertices, l, t + w, l + w, b - w, color);
    push_rect(&mut vertices, rt - w, t + w, rt, b - w, color);
    vertices
}

fn push_rect(out: &mut Vec<Vertex>, x0: f32, y0: f32, x1: f32, y1: f32, color: [f32; 4]) {
    // Two triangles
    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}
