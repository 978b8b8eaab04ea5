//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One update per displayed frame, speeds in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - Drawing only through the `Screen` trait, no platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{colliding, filter_collisions};
pub use state::{Body, BodyKind, GameEvent, World, formation};
pub use tick::{TickInput, all_clear_below, patrol};
