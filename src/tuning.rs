//! Data-driven game balance
//!
//! Every gameplay number lives here so a page can override it with a JSON
//! blob. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("enemy grid must have at least one row and one column")]
    EmptyGrid,
    #[error("enemy grid of {count} enemies exceeds the {max} limit")]
    GridTooLarge { count: u64, max: u64 },
    #[error("grid spacing {spacing} is smaller than an enemy ({enemy} px)")]
    GridOverlap { spacing: f32, enemy: f32 },
    #[error("enemy grid ({left}, {top})..({right}) does not fit a {width} px canvas")]
    GridOutOfBounds {
        left: f32,
        top: f32,
        right: f32,
        width: f32,
    },
    #[error("player row ({player_y}) must lie below the enemy grid ({grid_bottom})")]
    PlayerAboveGrid { player_y: f32, grid_bottom: f32 },
    #[error("player ({player_y}..{player_bottom}) is outside a {height} px canvas")]
    PlayerOffCanvas {
        player_y: f32,
        player_bottom: f32,
        height: f32,
    },
}

/// Upper bound on rows x columns accepted from an override
pub const MAX_GRID_ENEMIES: u64 = 1024;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_offset: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    /// Spawn height above the player's top edge
    pub projectile_spawn_gap: f32,

    pub grid_rows: u32,
    pub grid_cols: u32,
    pub grid_spacing: f32,
    pub grid_origin_x: f32,
    pub grid_origin_y: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,

    pub formation_step: f32,
    pub formation_interval_ms: f32,

    pub kill_reward: u64,
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_spawn_gap: PROJECTILE_SPAWN_GAP,

            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            grid_spacing: GRID_SPACING,
            grid_origin_x: GRID_ORIGIN_X,
            grid_origin_y: GRID_ORIGIN_Y,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,

            formation_step: FORMATION_STEP,
            formation_interval_ms: FORMATION_INTERVAL_MS,

            kill_reward: KILL_REWARD,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Player's top edge
    pub fn player_y(&self) -> f32 {
        self.canvas_height - self.player_bottom_offset
    }

    /// Right edge of the freshly spawned grid
    pub fn grid_right(&self) -> f32 {
        self.grid_origin_x + (self.grid_cols.saturating_sub(1)) as f32 * self.grid_spacing
            + self.enemy_width
    }

    /// Bottom edge of the freshly spawned grid
    pub fn grid_bottom(&self) -> f32 {
        self.grid_origin_y + (self.grid_rows.saturating_sub(1)) as f32 * self.grid_spacing
            + self.enemy_height
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("player_bottom_offset", self.player_bottom_offset),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("grid_spacing", self.grid_spacing),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("formation_step", self.formation_step),
            ("formation_interval_ms", self.formation_interval_ms),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.projectile_spawn_gap.is_nan() || self.projectile_spawn_gap < 0.0 {
            return Err(TuningError::NotPositive {
                field: "projectile_spawn_gap",
                value: self.projectile_spawn_gap,
            });
        }

        let player_bottom = self.player_y() + self.player_height;
        if player_bottom > self.canvas_height {
            return Err(TuningError::PlayerOffCanvas {
                player_y: self.player_y(),
                player_bottom,
                height: self.canvas_height,
            });
        }

        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(TuningError::EmptyGrid);
        }

        let count = self.grid_rows as u64 * self.grid_cols as u64;
        if count > MAX_GRID_ENEMIES {
            return Err(TuningError::GridTooLarge {
                count,
                max: MAX_GRID_ENEMIES,
            });
        }

        let enemy = self.enemy_width.max(self.enemy_height);
        if self.grid_spacing < enemy {
            return Err(TuningError::GridOverlap {
                spacing: self.grid_spacing,
                enemy,
            });
        }

        let right = self.grid_right();
        if self.grid_origin_x <= 0.0 || self.grid_origin_y <= 0.0 || right >= self.canvas_width {
            return Err(TuningError::GridOutOfBounds {
                left: self.grid_origin_x,
                top: self.grid_origin_y,
                right,
                width: self.canvas_width,
            });
        }

        let grid_bottom = self.grid_bottom();
        if grid_bottom >= self.player_y() {
            return Err(TuningError::PlayerAboveGrid {
                player_y: self.player_y(),
                grid_bottom,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_y(), 550.0);
        assert_eq!(tuning.grid_right(), 670.0);
        assert_eq!(tuning.grid_bottom(), 320.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "grid_rows": 3, "kill_reward": 50 }"#).unwrap();
        assert_eq!(tuning.grid_rows, 3);
        assert_eq!(tuning.kill_reward, 50);
        assert_eq!(tuning.grid_cols, GRID_COLS);
        assert_eq!(tuning.canvas_width, CANVAS_WIDTH);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = Tuning::from_json(r#"{ "formation_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "formation_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = Tuning::from_json(r#"{ "grid_cols": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::EmptyGrid));
    }

    #[test]
    fn test_rejects_grid_wider_than_canvas() {
        let err = Tuning::from_json(r#"{ "grid_cols": 13 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GridOutOfBounds { .. }));
    }

    #[test]
    fn test_rejects_negative_spacing() {
        let err = Tuning::from_json(r#"{ "grid_spacing": -60 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "grid_spacing",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_overlapping_enemies() {
        let err = Tuning::from_json(r#"{ "grid_spacing": 20 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GridOverlap { .. }));
    }

    #[test]
    fn test_rejects_huge_grid() {
        let err =
            Tuning::from_json(r#"{ "grid_spacing": 0, "grid_rows": 70000, "grid_cols": 70000 }"#)
                .unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { .. }));

        let err = Tuning::from_json(
            r#"{ "grid_spacing": 0.001, "enemy_width": 0.001, "enemy_height": 0.001,
                 "grid_rows": 70000, "grid_cols": 70000 }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::GridTooLarge {
                count: 4_900_000_000,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_grid_above_canvas() {
        let err = Tuning::from_json(r#"{ "grid_origin_y": -10 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GridOutOfBounds { .. }));
    }

    #[test]
    fn test_rejects_player_off_canvas() {
        let err = Tuning::from_json(r#"{ "player_bottom_offset": -20 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::NotPositive {
                field: "player_bottom_offset",
                ..
            }
        ));

        // Top edge on the canvas but the hull hangs off the bottom
        let err = Tuning::from_json(r#"{ "player_bottom_offset": 20 }"#).unwrap_err();
        assert!(matches!(err, TuningError::PlayerOffCanvas { .. }));
    }

    #[test]
    fn test_spawn_gap_override() {
        let tuning = Tuning::from_json(r#"{ "projectile_spawn_gap": 0 }"#).unwrap();
        assert_eq!(tuning.projectile_spawn_gap, 0.0);
        assert!(Tuning::from_json(r#"{ "projectile_spawn_gap": -5 }"#).is_err());
    }

    #[test]
    fn test_rejects_grid_below_player() {
        let err = Tuning::from_json(r#"{ "grid_rows": 9 }"#).unwrap_err();
        assert!(matches!(err, TuningError::PlayerAboveGrid { .. }));
    }
}
