//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a single oscillator whose gain steps through a short
//! envelope spread evenly across the effect's duration.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Formation reached the player
    PlayerDeath,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Square,
    Sawtooth,
    Triangle,
}

/// Synthesis parameters for one effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundParams {
    /// Gain levels, applied at evenly spaced points from start to end
    pub envelope: [f32; 4],
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
    /// Hz
    pub frequency: f32,
}

impl SoundEffect {
    /// Look up an effect by its event name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shoot" => Some(SoundEffect::Shoot),
            "explosion" => Some(SoundEffect::Explosion),
            "playerDeath" => Some(SoundEffect::PlayerDeath),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PlayerDeath => "playerDeath",
        }
    }

    pub fn params(&self) -> SoundParams {
        match self {
            SoundEffect::Shoot => SoundParams {
                envelope: [0.0, 0.1, 0.2, 0.0],
                duration: 0.1,
                waveform: Waveform::Square,
                frequency: 440.0,
            },
            SoundEffect::Explosion => SoundParams {
                envelope: [0.0, 0.1, 0.2, 0.0],
                duration: 0.3,
                waveform: Waveform::Sawtooth,
                frequency: 440.0,
            },
            SoundEffect::PlayerDeath => SoundParams {
                envelope: [0.0, 0.2, 0.3, 0.0],
                duration: 0.4,
                waveform: Waveform::Triangle,
                frequency: 440.0,
            },
        }
    }

    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::Explosion),
            GameEvent::GameOver { cleared: false, .. } => Some(SoundEffect::PlayerDeath),
            GameEvent::GameOver { cleared: true, .. } | GameEvent::FormationCleared => None,
        }
    }
}

impl SoundParams {
    /// `(offset_secs, gain)` pairs for the envelope, gains scaled by `volume`
    pub fn schedule(&self, volume: f32) -> Vec<(f64, f32)> {
        let last = (self.envelope.len() - 1) as f64;
        self.envelope
            .iter()
            .enumerate()
            .map(|(i, level)| (self.duration * (i as f64 / last), level * volume))
            .collect()
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AudioManager {
    /// `volume` is the effective effect volume (0.0 - 1.0)
    pub fn new(volume: f32) -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: create_context(),
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Play the sound for a simulation event (silent events are skipped)
    pub fn on_event(&self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Play by name; returns false for names with no registered sound
    pub fn play_named(&self, name: &str) -> bool {
        match SoundEffect::from_name(name) {
            Some(effect) => {
                self.play(effect);
                true
            }
            None => {
                log::trace!("No sound registered for '{}'", name);
                false
            }
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let params = effect.params();
        let Some((osc, gain)) = create_osc(ctx, params.frequency, params.waveform) else {
            return;
        };
        let t = ctx.current_time();
        for (offset, level) in params.schedule(self.volume) {
            gain.gain().set_value_at_time(level, t + offset).ok();
        }
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + params.duration).ok();
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        if self.volume > 0.0 {
            log::trace!("sound: {}", effect.name());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn create_context() -> Option<AudioContext> {
    // May fail outside a secure context
    let ctx = AudioContext::new().ok();
    if ctx.is_none() {
        log::warn!("Failed to create AudioContext - audio disabled");
    }
    ctx
}

/// Create an oscillator wired through a gain node to the speakers
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    waveform: Waveform,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(match waveform {
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    });
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for effect in [
            SoundEffect::Shoot,
            SoundEffect::Explosion,
            SoundEffect::PlayerDeath,
        ] {
            assert_eq!(SoundEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("laser"), None);
    }

    #[test]
    fn test_unknown_name_is_noop() {
        let audio = AudioManager::default();
        assert!(!audio.play_named("laser"));
        assert!(audio.play_named("shoot"));
    }

    #[test]
    fn test_explosion_schedule() {
        let schedule = SoundEffect::Explosion.params().schedule(1.0);
        assert_eq!(schedule.len(), 4);
        let expected = [(0.0, 0.0), (0.1, 0.1), (0.2, 0.2), (0.3, 0.0)];
        for ((t, g), (et, eg)) in schedule.iter().zip(expected) {
            assert!((t - et).abs() < 1e-9);
            assert!((g - eg).abs() < 1e-6);
        }
    }

    #[test]
    fn test_schedule_scales_with_volume() {
        let schedule = SoundEffect::PlayerDeath.params().schedule(0.5);
        assert!((schedule[2].1 - 0.15).abs() < 1e-6);
        assert!((schedule[3].0 - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Shot),
            Some(SoundEffect::Shoot)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyDestroyed { score: 100 }),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver {
                final_score: 0,
                cleared: false
            }),
            Some(SoundEffect::PlayerDeath)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::FormationCleared), None);
    }

    #[test]
    fn test_volume_clamped() {
        assert_eq!(AudioManager::new(3.0).volume, 1.0);
        assert_eq!(AudioManager::new(-1.0).volume, 0.0);
    }
}
