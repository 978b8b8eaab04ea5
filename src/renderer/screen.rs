//! Drawing surface abstraction
//!
//! The simulation only ever clears the canvas and fills rectangles, so that
//! is all a screen has to offer. `FrameBatch` turns those calls into
//! triangles for the GPU pipeline.

use super::shapes;
use super::vertex::{Vertex, colors};

/// A 2D surface in canvas pixel coordinates (origin top-left, y down)
pub trait Screen {
    /// Clear the region from the origin to (width, height) to background
    fn clear_region(&mut self, width: f32, height: f32);
    /// Fill an axis-aligned rectangle with its top-left corner at (x, y)
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// Collects one frame of draw calls as a triangle list
#[derive(Debug, Clone, Default)]
pub struct FrameBatch {
    vertices: Vec<Vertex>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of rectangles queued (background included)
    pub fn rect_count(&self) -> usize {
        self.vertices.len() / shapes::RECT_VERTICES
    }
}

impl Screen for FrameBatch {
    fn clear_region(&mut self, width: f32, height: f32) {
        // Everything queued so far is painted over
        self.vertices.clear();
        self.vertices
            .extend(shapes::rect(0.0, 0.0, width, height, colors::BACKGROUND));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.vertices
            .extend(shapes::rect(x, y, width, height, colors::BODY));
    }
}

/// Test double that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingScreen {
    pub clears: Vec<(f32, f32)>,
    pub rects: Vec<[f32; 4]>,
}

#[cfg(test)]
impl Screen for RecordingScreen {
    fn clear_region(&mut self, width: f32, height: f32) {
        self.clears.push((width, height));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rects.push([x, y, width, height]);
    }
}
