//! Keyboard state
//!
//! Key events arrive between frames and flip held flags here; the frame
//! driver takes a `TickInput` snapshot before each update. Space is released
//! automatically after the first frame that sees it, so a press fires one
//! bullet. Shift has no such release and keeps firing while held.

use crate::sim::TickInput;

/// Logical controls the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    FirePrimary,
    FireSecondary,
}

impl Control {
    /// Map a DOM `keyCode` to a control; unknown codes map to nothing
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Control::Left),
            39 => Some(Control::Right),
            32 => Some(Control::FirePrimary),
            16 => Some(Control::FireSecondary),
            _ => None,
        }
    }

    /// Whether the browser's default action (page scroll) should be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, Control::Left | Control::Right | Control::FirePrimary)
    }
}

/// Held state for every control
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: TickInput,
    /// Space went down since the last frame ended
    primary_pending_release: bool,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event. Returns the control it mapped to, if any.
    pub fn key_down(&mut self, code: u32) -> Option<Control> {
        let control = Control::from_key_code(code)?;
        self.set(control, true);
        if control == Control::FirePrimary {
            self.primary_pending_release = true;
        }
        Some(control)
    }

    /// Handle a key-up event. Returns the control it mapped to, if any.
    pub fn key_up(&mut self, code: u32) -> Option<Control> {
        let control = Control::from_key_code(code)?;
        self.set(control, false);
        Some(control)
    }

    pub fn is_down(&self, control: Control) -> bool {
        match control {
            Control::Left => self.held.left,
            Control::Right => self.held.right,
            Control::FirePrimary => self.held.fire_primary,
            Control::FireSecondary => self.held.fire_secondary,
        }
    }

    /// What the simulation sees this frame
    pub fn snapshot(&self) -> TickInput {
        self.held
    }

    /// Frame housekeeping, called after the frame has been simulated
    pub fn end_frame(&mut self) {
        if self.primary_pending_release {
            self.held.fire_primary = false;
            self.primary_pending_release = false;
        }
    }

    /// Drop every held control (focus lost, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
        self.primary_pending_release = false;
    }

    fn set(&mut self, control: Control, down: bool) {
        match control {
            Control::Left => self.held.left = down,
            Control::Right => self.held.right = down,
            Control::FirePrimary => self.held.fire_primary = down,
            Control::FireSecondary => self.held.fire_secondary = down,
        }
    }
}
