//! Audio system using Web Audio API
//!
//! Every cue is a single oscillator whose pitch steps down on a fixed
//! cadence. The whole sweep is scheduled on the audio clock up front, so a
//! cue never holds up the frame that triggered it and may outlive it.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// An invader fired
    InvaderFire,
    /// Player fired with space
    PlayerFire,
    /// Player fired with shift
    Laser,
}

impl SoundEffect {
    /// The pitch sweep that makes up this cue
    pub fn sweep(&self) -> ToneSweep {
        match self {
            SoundEffect::InvaderFire => ToneSweep::new(1400.0, 100.0),
            SoundEffect::PlayerFire => ToneSweep::new(2000.0, 100.0),
            SoundEffect::Laser => ToneSweep::new(1000.0, 50.0),
        }
    }
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::InvaderFired => SoundEffect::InvaderFire,
            GameEvent::PlayerFired => SoundEffect::PlayerFire,
            GameEvent::LaserFired => SoundEffect::Laser,
        }
    }
}

/// A descending stepped tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSweep {
    /// Starting frequency (Hz)
    pub start_hz: f32,
    /// Frequency drop per step (Hz)
    pub step_hz: f32,
    /// Time between steps (seconds)
    pub interval: f64,
    /// Total length of the tone (seconds)
    pub duration: f64,
}

impl ToneSweep {
    pub const INTERVAL: f64 = 0.025;
    pub const DURATION: f64 = 0.25;

    pub fn new(start_hz: f32, step_hz: f32) -> Self {
        Self {
            start_hz,
            step_hz,
            interval: Self::INTERVAL,
            duration: Self::DURATION,
        }
    }

    /// Frequency changes as `(offset_seconds, hz)`.
    ///
    /// Steps land strictly inside the tone; the step that would coincide
    /// with the stop time is never heard and is left out.
    pub fn steps(&self) -> impl Iterator<Item = (f64, f32)> + '_ {
        let count = (self.duration / self.interval).round() as u32;
        (1..count).map(move |k| {
            (
                k as f64 * self.interval,
                self.start_hz - k as f32 * self.step_hz,
            )
        })
    }

    /// Frequency during the final step
    pub fn end_hz(&self) -> f32 {
        self.steps().last().map_or(self.start_hz, |(_, hz)| hz)
    }
}

/// Anything that can play a cue without blocking
pub trait SoundSink {
    fn play(&self, effect: SoundEffect);
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Native builds have no audio backend; cues are only logged
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn play_sweep(&self, sweep: ToneSweep, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = create_osc(ctx, sweep.start_hz, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        osc.frequency().set_value_at_time(sweep.start_hz, t).ok();
        for (offset, hz) in sweep.steps() {
            osc.frequency().set_value_at_time(hz, t + offset).ok();
        }

        osc.start().ok();
        osc.stop_with_when(t + sweep.duration).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_sweep(&self, sweep: ToneSweep, vol: f32) {
        log::trace!(
            "tone {}Hz -> {}Hz at volume {:.2}",
            sweep.start_hz,
            sweep.end_hz(),
            vol
        );
    }
}

impl SoundSink for AudioManager {
    fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Playing {:?}", effect);
        self.play_sweep(effect.sweep(), vol);
    }
}

/// Create an oscillator routed through a gain node to the speakers
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}
