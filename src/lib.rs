//! Canvas Invaders - a tiny browser space-invaders clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, world update)
//! - `game`: Frame driver tying input, simulation, audio and drawing together
//! - `renderer`: Rectangle batching and the WebGPU pipeline
//! - `platform`: Browser input state
//! - `audio`: Procedural sound cues
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect, SoundSink};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side length of player and invader bounding boxes
    pub const SHIP_SIZE: f32 = 15.0;
    /// Side length of bullet bounding boxes
    pub const BULLET_SIZE: f32 = 3.0;

    /// Player horizontal speed (pixels per frame)
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Player spawns this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 15.0;
    /// Space bar bullet velocity (y)
    pub const PRIMARY_BULLET_SPEED: f32 = -6.0;
    /// Shift bullet velocity (y)
    pub const SECONDARY_BULLET_SPEED: f32 = -10.0;

    /// Invader patrol speed magnitude (pixels per frame)
    pub const INVADER_SPEED: f32 = 0.3;
    /// Patrol displacement window is [0, INVADER_PATROL_RANGE]
    pub const INVADER_PATROL_RANGE: f32 = 40.0;
    /// Per-invader, per-frame chance to fire when the shot is clear
    pub const INVADER_FIRE_CHANCE: f64 = 0.005;
    /// Invader bullet velocity (y)
    pub const INVADER_BULLET_SPEED: f32 = 2.0;

    /// Formation layout
    pub const INVADER_COUNT: usize = 24;
    pub const INVADER_COLUMNS: usize = 8;
    pub const INVADER_ROWS: usize = 3;
    pub const INVADER_SPACING: f32 = 60.0;
    pub const INVADER_ORIGIN: f32 = 60.0;
}
