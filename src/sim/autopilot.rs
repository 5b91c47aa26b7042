//! Idle/demo mode - AI plays the game
//!
//! Picks the column whose lowest enemy is closest to landing (ties broken by
//! distance from the ship), steers under it and fires whenever lined up.

use super::state::{Enemy, GameState};
use super::tick::TickInput;

/// Stateful AI driver; keeps its own fire latch so it taps instead of holding
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    fired_last_frame: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the input for the next frame
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        let Some(target) = pick_target(state) else {
            self.fired_last_frame = false;
            return input;
        };

        let ship_x = state.player.center_x();
        let target_x = center_x(target);
        let delta = target_x - ship_x;
        let tolerance = state.player.speed;

        if delta < -tolerance {
            input.left = true;
        } else if delta > tolerance {
            input.right = true;
        }

        let aligned = delta.abs() < target.rect.size.x / 2.0;
        // Only one shot in flight keeps the demo readable
        if aligned && state.projectiles.is_empty() && !self.fired_last_frame {
            input.fire = true;
        }
        self.fired_last_frame = input.fire;

        input
    }
}

/// Lowest enemy overall, preferring the one nearest the ship
fn pick_target(state: &GameState) -> Option<&Enemy> {
    let ship_x = state.player.center_x();
    state.enemies.iter().min_by(|a, b| {
        b.rect
            .bottom()
            .total_cmp(&a.rect.bottom())
            .then_with(|| {
                let da = (center_x(a) - ship_x).abs();
                let db = (center_x(b) - ship_x).abs();
                da.total_cmp(&db)
            })
    })
}

fn center_x(enemy: &Enemy) -> f32 {
    enemy.rect.pos.x + enemy.rect.size.x / 2.0
}
