//! Platform abstraction layer
//!
//! Browser-facing state that the simulation reads but never owns.

pub mod input;

pub use input::{Control, Keyboard};
