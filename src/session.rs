//! Frame driver and lifecycle control
//!
//! Owns the game state plus everything that turns animation-frame callbacks
//! into ticks: frame timing, keyboard sampling, demo mode and the
//! "is a frame scheduled" flag that keeps restart from spawning a second loop.

use crate::sim::{
    Autopilot, Control, GameEvent, GameState, InputSampler, KeyCommand, TickInput, tick,
};
use crate::tuning::Tuning;

/// Result of processing one animation frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Events emitted during the tick, for audio and HUD observers
    pub events: Vec<GameEvent>,
    /// Whether the caller should request another animation frame
    pub reschedule: bool,
}

/// A running game plus its frame loop bookkeeping
pub struct Session {
    pub state: GameState,
    pub input: InputSampler,
    /// Demo mode driver; replaces keyboard input while set
    pub autopilot: Option<Autopilot>,
    /// Timestamp (ms) of the previous frame
    last_time: Option<f64>,
    /// An animation frame is pending
    scheduled: bool,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            input: InputSampler::new(),
            autopilot: None,
            last_time: None,
            scheduled: false,
        }
    }

    /// Begin the frame loop; returns true if the caller must request a frame
    pub fn start(&mut self) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        self.last_time = None;
        true
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Reset the run; returns true if the loop had halted and must be resumed
    pub fn restart(&mut self) -> bool {
        self.state.restart();
        log::info!("Game restarted");
        let resume = self.start();
        // Fresh timing even when the loop never stopped
        self.last_time = None;
        resume
    }

    pub fn key_down(&mut self, control: Control) {
        self.input.key_down(control);
    }

    pub fn key_up(&mut self, control: Control) {
        self.input.key_up(control);
    }

    /// Route a `keydown`; returns true if the browser default should be suppressed
    ///
    /// Auto-repeat is harmless for held controls but must not flip toggles.
    pub fn handle_key_down(&mut self, key: &str, repeat: bool) -> bool {
        match KeyCommand::from_key(key) {
            Some(KeyCommand::Control(control)) => {
                self.key_down(control);
                true
            }
            Some(KeyCommand::ToggleDemo) => {
                if !repeat {
                    self.toggle_autopilot();
                }
                false
            }
            None => false,
        }
    }

    /// Route a `keyup`; returns true if the browser default should be suppressed
    pub fn handle_key_up(&mut self, key: &str) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.key_up(control);
                true
            }
            None => false,
        }
    }

    /// Toggle demo mode; returns whether it is now on
    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = match self.autopilot {
            Some(_) => None,
            None => Some(Autopilot::new()),
        };
        let on = self.autopilot.is_some();
        log::info!("Demo mode {}", if on { "on" } else { "off" });
        on
    }

    /// Process one animation frame stamped `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        let dt_ms = match self.last_time {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        // Keep the sampler's latch in step even while the autopilot drives
        let keyboard = self.input.sample();
        let input: TickInput = match self.autopilot.as_mut() {
            Some(pilot) => pilot.next_input(&self.state),
            None => keyboard,
        };

        tick(&mut self.state, &input, dt_ms);

        let reschedule = !self.state.is_over();
        if !reschedule {
            self.scheduled = false;
        }

        FrameOutcome {
            events: self.state.drain_events(),
            reschedule,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
