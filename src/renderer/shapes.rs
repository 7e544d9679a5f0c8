//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.right(), rect.bottom());
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Hollow rectangle as four edge quads of the given thickness
pub fn outline(rect: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0);
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, t),
        Rect::new(rect.x, rect.bottom() - t, rect.w, t),
        Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t),
        Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2.0 * t),
    ];

    let mut vertices = Vec::with_capacity(edges.len() * 6);
    for edge in &edges {
        vertices.extend_from_slice(&quad(edge, color));
    }
    vertices
}

/// Horizontal fill bar: background plus a `fraction`-wide foreground
pub fn bar(rect: &Rect, fraction: f32, bg: [f32; 4], fg: [f32; 4]) -> Vec<Vertex> {
    let filled = Rect::new(rect.x, rect.y, rect.w * fraction.clamp(0.0, 1.0), rect.h);
    let mut vertices = Vec::with_capacity(12);
    vertices.extend_from_slice(&quad(rect, bg));
    if filled.w > 0.0 {
        vertices.extend_from_slice(&quad(&filled, fg));
    }
    vertices
}
