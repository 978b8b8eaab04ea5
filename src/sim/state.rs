//! World state and core simulation types
//!
//! Everything the frame loop mutates lives here: the body list, the canvas
//! dimensions and the seeded RNG that drives invader fire.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Screen;

/// Per-kind data for a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Player ship, driven by input
    Player,
    /// Formation member patrolling left and right
    Invader {
        /// Displacement travelled in the current sweep
        patrol_x: f32,
        /// Signed horizontal speed, flips at the patrol bounds
        speed_x: f32,
    },
    /// Projectile moving in a straight line until it hits something
    Bullet { velocity: Vec2 },
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub center: Vec2,
    /// Full box extents, measured from `center`
    pub size: Vec2,
    pub kind: BodyKind,
}

impl Body {
    fn new(center: Vec2, size: Vec2, kind: BodyKind) -> Self {
        debug_assert!(center.is_finite(), "body center must be finite: {center}");
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "body size must be non-negative: {size}");
        Self { center, size, kind }
    }

    pub fn player(center: Vec2) -> Self {
        Self::new(center, Vec2::splat(SHIP_SIZE), BodyKind::Player)
    }

    /// Invader at the start of its sweep, heading right
    pub fn invader(center: Vec2) -> Self {
        Self::new(
            center,
            Vec2::splat(SHIP_SIZE),
            BodyKind::Invader {
                patrol_x: 0.0,
                speed_x: INVADER_SPEED,
            },
        )
    }

    pub fn bullet(center: Vec2, velocity: Vec2) -> Self {
        Self::new(center, Vec2::splat(BULLET_SIZE), BodyKind::Bullet { velocity })
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, BodyKind::Player)
    }

    pub fn is_invader(&self) -> bool {
        matches!(self.kind, BodyKind::Invader { .. })
    }

    pub fn is_bullet(&self) -> bool {
        matches!(self.kind, BodyKind::Bullet { .. })
    }

    /// Draw as a filled rectangle.
    ///
    /// Position is halved while the extents are not. The mismatch is kept as-is
    /// so the picture matches the browser build it was tuned against.
    pub fn draw(&self, screen: &mut impl Screen) {
        let pos = self.center / 2.0;
        screen.fill_rect(pos.x, pos.y, self.size.x, self.size.y);
    }
}

/// Something that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An invader dropped a bullet
    InvaderFired,
    /// Player fired with the primary trigger (space)
    PlayerFired,
    /// Player fired with the secondary trigger (shift)
    LaserFired,
}

/// The whole simulation
#[derive(Debug, Clone)]
pub struct World {
    /// Live bodies; order is draw order
    pub bodies: Vec<Body>,
    /// Canvas dimensions
    pub size: Vec2,
    /// Canvas center (size / 2)
    pub center: Vec2,
    /// Chance per invader per frame to roll a shot
    pub fire_chance: f64,
    /// Frames simulated so far
    pub frame: u64,
    pub(crate) rng: Pcg32,
    seed: u64,
}

impl World {
    /// Create a world with the player and the full invader formation
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut world = Self::empty(width, height, seed);

        world.bodies.push(Body::player(Vec2::new(
            world.center.x,
            world.size.y - PLAYER_BOTTOM_OFFSET,
        )));
        world.bodies.extend(formation());

        log::debug!(
            "World {}x{} created with {} bodies (seed {})",
            width,
            height,
            world.bodies.len(),
            seed
        );
        world
    }

    /// Create a world with exactly the given bodies
    pub fn with_bodies(width: f32, height: f32, seed: u64, bodies: Vec<Body>) -> Self {
        let mut world = Self::empty(width, height, seed);
        world.bodies = bodies;
        world
    }

    fn empty(width: f32, height: f32, seed: u64) -> Self {
        let size = Vec2::new(width, height);
        Self {
            bodies: Vec::new(),
            size,
            center: size / 2.0,
            fire_chance: INVADER_FIRE_CHANCE,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_player())
    }

    pub fn invaders(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_invader())
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_bullet())
    }

    /// Clear the canvas, then draw every body in list order
    pub fn draw(&self, screen: &mut impl Screen) {
        screen.clear_region(self.size.x, self.size.y);
        for body in &self.bodies {
            body.draw(screen);
        }
    }
}

/// The starting invader formation.
///
/// Columns cycle with `i % 8` and rows with `i % 3`; since 8 and 3 are coprime
/// the 24 indices cover every cell of the grid exactly once.
pub fn formation() -> impl Iterator<Item = Body> {
    (0..INVADER_COUNT).map(|i| {
        let col = (i % INVADER_COLUMNS) as f32;
        let row = (i % INVADER_ROWS) as f32;
        Body::invader(Vec2::new(
            INVADER_ORIGIN + col * INVADER_SPACING,
            INVADER_ORIGIN + row * INVADER_SPACING,
        ))
    })
}
