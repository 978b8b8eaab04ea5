//! Shape generation for 2D primitives

use super::vertex::Vertex;

/// Vertices emitted per rectangle (two triangles)
pub const RECT_VERTICES: usize = 6;

/// Generate vertices for a filled axis-aligned rectangle
///
/// `(x, y)` is the top-left corner in canvas pixels.
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> [Vertex; RECT_VERTICES] {
    let (x0, y0) = (x, y);
    let (x1, y1) = (x + width, y + height);

    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
    ]
}
