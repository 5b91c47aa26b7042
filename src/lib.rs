//! Pixel Invaders - A fixed-grid alien invasion arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, formation, collisions, game state)
//! - `renderer`: WebGPU rendering of flat-color rectangles
//! - `audio`: Procedural sound effects via Web Audio
//! - `session`: Frame driver and lifecycle (start, game over, restart)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences (volume, debug overlay)

pub mod audio;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::{FrameOutcome, Session};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal movement per frame while a direction key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the bottom of the canvas to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    /// Upward movement per frame
    pub const PROJECTILE_SPEED: f32 = 30.0;
    /// Spawn height above the player's top edge
    pub const PROJECTILE_SPAWN_GAP: f32 = 10.0;

    /// Enemy grid
    pub const GRID_ROWS: u32 = 5;
    pub const GRID_COLS: u32 = 10;
    /// Distance between neighbouring enemies (both axes)
    pub const GRID_SPACING: f32 = 60.0;
    pub const GRID_ORIGIN_X: f32 = 100.0;
    pub const GRID_ORIGIN_Y: f32 = 50.0;
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;

    /// Formation movement
    pub const FORMATION_STEP: f32 = 30.0;
    pub const FORMATION_INTERVAL_MS: f32 = 1000.0;

    /// Score per enemy destroyed
    pub const KILL_REWARD: u64 = 100;
    pub const STARTING_LIVES: u8 = 3;

    /// Longest frame delta fed to the simulation (backgrounded tabs)
    pub const MAX_FRAME_MS: f32 = 250.0;
    /// Nominal frame length used by headless runs
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}
