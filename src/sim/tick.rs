//! Per-frame simulation tick
//!
//! Core game loop: input, projectiles, formation, collisions.

use super::collision::resolve_collisions;
use super::formation::{StepKind, advance_formation};
use super::state::{GameEvent, GameState};
use crate::consts::MAX_FRAME_MS;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Spawn a projectile (already edge-detected)
    pub fire: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.is_over() {
        return;
    }

    state.frame += 1;
    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);

    // Player
    let width = state.tuning.canvas_width;
    if input.left {
        let speed = state.player.speed;
        state.player.nudge(-speed, width);
    }
    if input.right {
        let speed = state.player.speed;
        state.player.nudge(speed, width);
    }
    if input.fire {
        state.fire();
    }

    // Projectiles fly straight up and leave through the top
    let speed = state.tuning.projectile_speed;
    for shot in &mut state.projectiles {
        shot.rect.pos.y -= speed;
    }
    state.projectiles.retain(|p| p.rect.pos.y >= 0.0);

    if let Some(StepKind::Descend) = advance_formation(state, dt_ms) {
        let bottom = state
            .enemies
            .iter()
            .map(|e| e.rect.bottom())
            .fold(f32::MIN, f32::max);
        log::debug!("Formation descended, lowest edge at {}", bottom);
    }

    // A landing ends the run before any last-moment hit can score
    if state.is_over() {
        return;
    }

    resolve_collisions(state);

    if state.enemies.is_empty() && !state.is_over() {
        state.events.push(GameEvent::FormationCleared);
        state.end(true);
    }
}
