//! Lock-step enemy formation movement
//!
//! The whole grid sweeps sideways one step per interval. When any enemy
//! touches a canvas edge the direction flips and the following step drops
//! every enemy one row instead of moving sideways.

use super::state::GameState;

/// Outcome of a single formation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Sweep,
    Descend,
}

/// Accumulate frame time and step the formation when the interval elapses
///
/// Returns the step taken this frame, if any.
pub fn advance_formation(state: &mut GameState, dt_ms: f32) -> Option<StepKind> {
    state.formation.timer_ms += dt_ms;
    if state.formation.timer_ms < state.tuning.formation_interval_ms {
        return None;
    }
    state.formation.timer_ms = 0.0;
    Some(step_formation(state))
}

/// Move every enemy once, update direction, then check for invasion
pub fn step_formation(state: &mut GameState) -> StepKind {
    let step = state.tuning.formation_step;
    let width = state.tuning.canvas_width;
    let descending = state.formation.step_down;
    let dx = step * state.formation.direction;

    let mut touched_edge = false;
    for enemy in &mut state.enemies {
        if descending {
            enemy.rect.pos.y += step;
        } else {
            enemy.rect.pos.x += dx;
        }
        if enemy.rect.left() <= 0.0 || enemy.rect.right() >= width {
            touched_edge = true;
        }
    }

    if touched_edge && !descending {
        state.formation.direction = -state.formation.direction;
        state.formation.step_down = true;
        log::debug!("Formation hit edge, now heading {}", state.formation.direction);
    } else {
        state.formation.step_down = false;
    }

    let player_y = state.player.rect.top();
    if state.enemies.iter().any(|e| e.rect.bottom() >= player_y) {
        state.end(false);
    }

    if descending {
        StepKind::Descend
    } else {
        StepKind::Sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    fn xs(state: &GameState) -> Vec<f32> {
        state.enemies.iter().map(|e| e.rect.pos.x).collect()
    }

    #[test]
    fn test_timer_gates_steps() {
        let mut state = GameState::default();
        assert_eq!(advance_formation(&mut state, 600.0), None);
        assert_eq!(state.enemies[0].rect.pos.x, 100.0);
        assert_eq!(advance_formation(&mut state, 400.0), Some(StepKind::Sweep));
        assert_eq!(state.enemies[0].rect.pos.x, 130.0);
        assert_eq!(state.formation.timer_ms, 0.0);
    }

    #[test]
    fn test_sweep_moves_all_enemies() {
        let mut state = GameState::default();
        let before = xs(&state);
        step_formation(&mut state);
        let after = xs(&state);
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(a - b, 30.0);
        }
    }

    #[test]
    fn test_reversal_then_descend() {
        let mut state = GameState::default();
        // Right edge of the grid starts at 670; 4 sweeps reach 790, the 5th 820
        let mut sweeps = 0;
        while !state.formation.step_down {
            assert_eq!(step_formation(&mut state), StepKind::Sweep);
            sweeps += 1;
        }
        assert_eq!(sweeps, 5);
        assert_eq!(state.formation.direction, -1.0);

        let ys: Vec<f32> = state.enemies.iter().map(|e| e.rect.pos.y).collect();
        let before_x = xs(&state);
        assert_eq!(step_formation(&mut state), StepKind::Descend);
        assert_eq!(xs(&state), before_x);
        for (e, y) in state.enemies.iter().zip(ys) {
            assert_eq!(e.rect.pos.y, y + 30.0);
        }
        assert!(!state.formation.step_down);
        assert_eq!(state.formation.direction, -1.0);

        // Next step sweeps left
        step_formation(&mut state);
        assert_eq!(xs(&state)[0], before_x[0] - 30.0);
    }

    #[test]
    fn test_direction_flips_once_per_contact() {
        let mut state = GameState::default();
        let mut flips = 0;
        let mut last_dir = state.formation.direction;
        for _ in 0..40 {
            step_formation(&mut state);
            if state.formation.direction != last_dir {
                flips += 1;
                last_dir = state.formation.direction;
                // A flip is always followed by a descent
                assert!(state.formation.step_down);
            }
            if state.is_over() {
                break;
            }
        }
        assert!(flips >= 2);
    }

    #[test]
    fn test_reaching_player_row_ends_game() {
        let mut state = GameState::default();
        state.enemies[0].rect.pos.y = state.player.rect.top() - 30.0 - 30.0 + 1.0;
        state.formation.step_down = true;
        step_formation(&mut state);
        assert_eq!(state.phase, GamePhase::Over);
        assert!(!state.cleared);
    }

    #[test]
    fn test_empty_formation_is_harmless() {
        let mut state = GameState::default();
        state.enemies.clear();
        assert_eq!(step_formation(&mut state), StepKind::Sweep);
        assert_eq!(state.phase, GamePhase::Running);
    }
}
