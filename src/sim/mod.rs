//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven updates only (elapsed time feeds the formation timer)
//! - No randomness
//! - No rendering, audio or platform dependencies; presentation reacts to
//!   drained [`GameEvent`]s

pub mod autopilot;
pub mod collision;
pub mod formation;
pub mod input;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{rects_overlap, resolve_collisions};
pub use formation::{StepKind, advance_formation, step_formation};
pub use input::{Control, InputSampler, KeyCommand};
pub use state::{Enemy, Formation, GameEvent, GamePhase, GameState, Player, Projectile, Rect};
pub use tick::{TickInput, tick};
