//! Keyboard sampling
//!
//! Browser key events only flip "held" flags; the frame driver samples them
//! once per frame into a [`TickInput`]. Fire is edge-triggered: holding the
//! key yields a single shot, and another shot needs a frame that observes the
//! key released.

use super::tick::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Fire,
}

impl Control {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            " " | "Spacebar" => Some(Control::Fire),
            _ => None,
        }
    }
}

/// Anything a key press can ask of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Control(Control),
    /// Flip demo mode
    ToggleDemo,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "i" | "I" => Some(KeyCommand::ToggleDemo),
            _ => Control::from_key(key).map(KeyCommand::Control),
        }
    }
}

/// Held-key tracker with a fire latch
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    left: bool,
    right: bool,
    fire: bool,
    /// Fire already consumed for the current press
    fire_latched: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, control: Control) {
        self.set(control, true);
    }

    pub fn key_up(&mut self, control: Control) {
        self.set(control, false);
    }

    fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Left => self.left = held,
            Control::Right => self.right = held,
            Control::Fire => self.fire = held,
        }
    }

    /// Release every key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.fire = false;
    }

    /// Produce this frame's input
    pub fn sample(&mut self) -> TickInput {
        let fire = self.fire && !self.fire_latched;
        if fire {
            self.fire_latched = true;
        }
        if !self.fire {
            self.fire_latched = false;
        }

        TickInput {
            left: self.left,
            right: self.right,
            fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("ArrowLeft"), Some(Control::Left));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::Right));
        assert_eq!(Control::from_key(" "), Some(Control::Fire));
        assert_eq!(Control::from_key("a"), None);
        assert_eq!(Control::from_key("Enter"), None);
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(KeyCommand::from_key("i"), Some(KeyCommand::ToggleDemo));
        assert_eq!(KeyCommand::from_key("I"), Some(KeyCommand::ToggleDemo));
        assert_eq!(
            KeyCommand::from_key(" "),
            Some(KeyCommand::Control(Control::Fire))
        );
        assert_eq!(KeyCommand::from_key("x"), None);
    }

    #[test]
    fn test_held_movement_repeats() {
        let mut input = InputSampler::new();
        input.key_down(Control::Left);
        for _ in 0..5 {
            let tick = input.sample();
            assert!(tick.left);
            assert!(!tick.right);
        }
        input.key_up(Control::Left);
        assert!(!input.sample().left);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = InputSampler::new();
        input.key_down(Control::Fire);
        assert!(input.sample().fire);
        for _ in 0..30 {
            // Auto-repeat keydowns while held change nothing
            input.key_down(Control::Fire);
            assert!(!input.sample().fire);
        }

        input.key_up(Control::Fire);
        assert!(!input.sample().fire);
        input.key_down(Control::Fire);
        assert!(input.sample().fire);
    }

    #[test]
    fn test_release_between_samples_is_missed() {
        let mut input = InputSampler::new();
        input.key_down(Control::Fire);
        assert!(input.sample().fire);
        // Release and re-press inside one frame: the latch never sees the release
        input.key_up(Control::Fire);
        input.key_down(Control::Fire);
        assert!(!input.sample().fire);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputSampler::new();
        input.key_down(Control::Left);
        input.key_down(Control::Fire);
        input.release_all();
        let tick = input.sample();
        assert!(!tick.left && !tick.fire);
        // The latch resets, so the next press fires again
        input.key_down(Control::Fire);
        assert!(input.sample().fire);
    }
}
