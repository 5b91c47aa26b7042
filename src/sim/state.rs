//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{MAX_GRID_ENEMIES, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; no further ticks are processed
    Over,
}

/// Axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal movement per frame
    pub speed: f32,
}

impl Player {
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.canvas_width / 2.0,
                tuning.player_y(),
                tuning.player_width,
                tuning.player_height,
            ),
            speed: tuning.player_speed,
        }
    }

    /// Shift horizontally, staying inside `[0, canvas_width - width]`
    pub fn nudge(&mut self, dx: f32, canvas_width: f32) {
        let max_x = (canvas_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + dx).clamp(0.0, max_x);
    }

    /// Horizontal center of the ship
    pub fn center_x(&self) -> f32 {
        self.rect.pos.x + self.rect.size.x / 2.0
    }
}

/// A shot travelling up the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
}

/// A member of the invading formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Grid cell the enemy spawned in
    pub row: u32,
    pub col: u32,
}

/// Lock-step movement state shared by every enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// +1 sweeping right, -1 sweeping left
    pub direction: f32,
    /// Next step moves down instead of sideways
    pub step_down: bool,
    /// Milliseconds accumulated toward the next step
    pub timer_ms: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            direction: 1.0,
            step_down: false,
            timer_ms: 0.0,
        }
    }
}

/// Notifications for presentation code (audio, HUD), drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a projectile
    Shot,
    /// A projectile destroyed an enemy; carries the new score
    EnemyDestroyed { score: u64 },
    /// The last enemy was destroyed
    FormationCleared,
    /// Run ended
    GameOver { final_score: u64, cleared: bool },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this run was built with
    pub tuning: Tuning,
    pub player: Player,
    /// Active projectiles (order irrelevant)
    pub projectiles: Vec<Projectile>,
    /// Active enemies
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Run ended because the formation was wiped out
    pub cleared: bool,
    /// Frames simulated since (re)start
    pub frame: u64,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new running game
    pub fn new(tuning: Tuning) -> Self {
        let mut state = Self {
            player: Player::spawn(&tuning),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            formation: Formation::default(),
            score: 0,
            lives: tuning.starting_lives,
            phase: GamePhase::Running,
            cleared: false,
            frame: 0,
            events: Vec::new(),
            tuning,
        };
        state.spawn_formation();
        state
    }

    /// Reset everything to the start-of-run layout
    pub fn restart(&mut self) {
        self.player = Player::spawn(&self.tuning);
        self.projectiles.clear();
        self.enemies.clear();
        self.formation = Formation::default();
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::Running;
        self.cleared = false;
        self.frame = 0;
        self.events.clear();
        self.spawn_formation();
    }

    /// Populate the rows x columns enemy grid
    pub fn spawn_formation(&mut self) {
        let t = &self.tuning;
        let count = (t.grid_rows as usize).saturating_mul(t.grid_cols as usize);
        let mut enemies = Vec::with_capacity(count.min(MAX_GRID_ENEMIES as usize));
        for row in 0..t.grid_rows {
            for col in 0..t.grid_cols {
                enemies.push(Enemy {
                    rect: Rect::new(
                        t.grid_origin_x + col as f32 * t.grid_spacing,
                        t.grid_origin_y + row as f32 * t.grid_spacing,
                        t.enemy_width,
                        t.enemy_height,
                    ),
                    row,
                    col,
                });
            }
        }
        self.enemies = enemies;
    }

    /// Create a projectile just above the ship's nose
    pub fn fire(&mut self) {
        let t = &self.tuning;
        let rect = Rect::new(
            self.player.center_x() - t.projectile_width / 2.0,
            self.player.rect.pos.y - t.projectile_spawn_gap,
            t.projectile_width,
            t.projectile_height,
        );
        log::debug!("Projectile fired at ({}, {})", rect.pos.x, rect.pos.y);
        self.projectiles.push(Projectile { rect });
        self.events.push(GameEvent::Shot);
    }

    /// Enter the terminal phase (no-op if already over)
    pub fn end(&mut self, cleared: bool) {
        if self.phase == GamePhase::Over {
            return;
        }
        self.phase = GamePhase::Over;
        self.cleared = cleared;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            cleared,
        });
        log::info!(
            "Game over (cleared: {}) with score {} after {} frames",
            cleared,
            self.score,
            self.frame
        );
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
