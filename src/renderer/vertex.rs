//! Flat-colored vertex format shared by the batch and the GPU pipeline

use bytemuck::{Pod, Zeroable};

/// Corner of a filled rectangle.
///
/// `position` is in canvas pixels while the batch is being built and in
/// clip space once [`RenderState`](super::RenderState) has mapped it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Same color, moved to `(x, y)`
    pub const fn moved_to(self, x: f32, y: f32) -> Self {
        Self::new(x, y, self.color)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub mod colors {
    /// Every body shares one color, as on the 2D canvas
    pub const BODY: [f32; 4] = [0.85, 0.95, 0.85, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_moved_to_keeps_color() {
        let v = Vertex::new(1.0, 2.0, colors::BODY).moved_to(-0.5, 0.5);
        assert_eq!(v, Vertex::new(-0.5, 0.5, colors::BODY));
    }
}
