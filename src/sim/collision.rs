//! Projectile versus enemy collision
//!
//! Brute-force pairwise AABB checks. Entity counts are small and fixed, so
//! there is no broad phase.

use super::state::{GameEvent, GameState, Rect};

/// Strict axis-aligned overlap: touching edges do not count
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Remove every projectile/enemy pair that overlaps and award score
///
/// Both collections are walked back to front so removals never disturb the
/// indices still to be visited. A projectile destroys at most one enemy.
/// Returns the number of enemies destroyed.
pub fn resolve_collisions(state: &mut GameState) -> u32 {
    let mut kills = 0;

    for i in (0..state.projectiles.len()).rev() {
        let shot = state.projectiles[i].rect;
        let hit = (0..state.enemies.len())
            .rev()
            .find(|&j| rects_overlap(&shot, &state.enemies[j].rect));

        if let Some(j) = hit {
            state.projectiles.swap_remove(i);
            let enemy = state.enemies.remove(j);
            state.score += state.tuning.kill_reward;
            state.events.push(GameEvent::EnemyDestroyed { score: state.score });
            log::debug!(
                "Enemy ({}, {}) destroyed, score {}",
                enemy.row,
                enemy.col,
                state.score
            );
            kills += 1;
        }
    }

    kills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(rects_overlap(&a, &Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!rects_overlap(&a, &Rect::new(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Rect::new(-10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Rect::new(3.0, 4.0, 5.0, 6.0);
        let b = Rect::new(7.0, 9.0, 2.0, 2.0);
        assert_eq!(rects_overlap(&a, &b), rects_overlap(&b, &a));
    }

    #[test]
    fn test_projectile_over_first_enemy() {
        let mut state = GameState::default();
        let target = state.enemies[0].rect;
        state.projectiles.push(Projectile { rect: target });

        let kills = resolve_collisions(&mut state);

        assert_eq!(kills, 1);
        assert_eq!(state.enemies.len(), 49);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 100);
        assert!(state.enemies.iter().all(|e| e.rect != target));
        assert_eq!(state.events, vec![GameEvent::EnemyDestroyed { score: 100 }]);
    }

    #[test]
    fn test_one_enemy_per_projectile() {
        let mut state = GameState::default();
        // Tall projectile spanning two rows of the first column
        state.projectiles.push(Projectile {
            rect: Rect::new(110.0, 40.0, 4.0, 100.0),
        });

        resolve_collisions(&mut state);

        assert_eq!(state.enemies.len(), 49);
        assert_eq!(state.score, 100);
        // Reverse scan hits the later (lower) enemy first
        assert!(state.enemies.iter().any(|e| e.row == 0 && e.col == 0));
        assert!(!state.enemies.iter().any(|e| e.row == 1 && e.col == 0));
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut state = GameState::default();
        state.projectiles.push(Projectile {
            rect: Rect::new(5.0, 5.0, 4.0, 15.0),
        });
        assert_eq!(resolve_collisions(&mut state), 0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.enemies.len(), 50);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_several_projectiles_several_kills() {
        let mut state = GameState::default();
        for j in [0usize, 5, 12] {
            let rect = state.enemies[j].rect;
            state.projectiles.push(Projectile { rect });
        }
        state.projectiles.push(Projectile {
            rect: Rect::new(5.0, 5.0, 4.0, 15.0),
        });

        assert_eq!(resolve_collisions(&mut state), 3);
        assert_eq!(state.enemies.len(), 47);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.score, 300);
    }
}
