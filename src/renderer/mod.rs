//! Rendering module
//!
//! The simulation draws through the `Screen` trait; `FrameBatch` turns those
//! calls into vertices and `RenderState` pushes them through WebGPU.

pub mod pipeline;
pub mod screen;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
#[cfg(test)]
pub(crate) use screen::RecordingScreen;
pub use screen::{FrameBatch, Screen};
