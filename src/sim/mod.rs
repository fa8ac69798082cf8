//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per simulation step
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod mirror;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{Basket, Outcome, catch_outcome, in_catch_window, shot_outcome};
pub use mirror::{Lean, MIRRORS, Mirror};
pub use registry::{Brick, BrickClass, EntityId, Projectile, Registry};
pub use state::{
    Camera, Controls, GameEvent, GameOverCause, GamePhase, GameReport, GameState,
};
pub use tick::{FallSpeed, Step, TickInput, tick};
