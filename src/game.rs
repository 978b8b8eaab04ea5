//! Frame driver
//!
//! One `frame()` per display refresh: read the keyboard, step the world,
//! hand sound events to the audio sink, draw. There is no frame-rate
//! control and no catch-up; the host's refresh callback sets the pace and
//! the loop never ends on its own.

use crate::audio::{SoundEffect, SoundSink};
use crate::platform::Keyboard;
use crate::renderer::Screen;
use crate::sim::World;

/// A running game: the world plus the input it is fed
#[derive(Debug, Clone)]
pub struct Game {
    pub world: World,
    pub keyboard: Keyboard,
}

impl Game {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::from_world(World::new(width, height, seed))
    }

    pub fn from_world(world: World) -> Self {
        Self {
            world,
            keyboard: Keyboard::new(),
        }
    }

    /// Run one full frame: update then draw
    pub fn frame(&mut self, screen: &mut impl Screen, audio: &impl SoundSink) {
        let input = self.keyboard.snapshot();

        for event in self.world.update(&input) {
            audio.play(SoundEffect::from(event));
        }
        self.world.draw(screen);

        self.keyboard.end_frame();
    }
}
