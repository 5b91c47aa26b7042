//! Build the per-frame vertex list from game state

use super::shapes::{OUTLINE_WIDTH, rect, rect_outline};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::GameState;

/// Player, projectiles and enemies as flat rectangles, plus hitbox outlines
/// when the debug overlay is on
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let count = 1 + state.projectiles.len() + state.enemies.len();
    let per_entity = if settings.debug_overlay { 30 } else { 6 };
    let mut vertices = Vec::with_capacity(count * per_entity);

    vertices.extend(rect(&state.player.rect, colors::PLAYER));
    for shot in &state.projectiles {
        vertices.extend(rect(&shot.rect, colors::PROJECTILE));
    }
    for enemy in &state.enemies {
        vertices.extend(rect(&enemy.rect, colors::ENEMY));
    }

    if settings.debug_overlay {
        for shot in &state.projectiles {
            vertices.extend(rect_outline(
                &shot.rect,
                colors::PROJECTILE_OUTLINE,
                OUTLINE_WIDTH,
            ));
        }
        for enemy in &state.enemies {
            vertices.extend(rect_outline(&enemy.rect, colors::ENEMY_OUTLINE, OUTLINE_WIDTH));
        }
    }

    vertices
}
