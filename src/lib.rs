//! Brick Breaker - falling bricks, two baskets, a shooter and four mirrors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring, game state)
//! - `renderer`: Mesh catalog and per-frame draw submission
//! - `input`: Keyboard state sampling into per-tick commands
//! - `autopilot`: Demo player used by the headless host
//! - `audio`: Looping background track
//! - `clock`: Frame-to-tick pacing

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, Timestep};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Half extent of the default orthographic view
    pub const VIEW_HALF_EXTENT: f32 = 4.0;
    /// Entities beyond this distance on either axis are despawned
    pub const PLAYFIELD_LIMIT: f32 = 4.5;

    /// Session defaults
    pub const INITIAL_LIFE: i32 = 5;

    /// Brick spawning
    pub const BRICK_SPAWN_INTERVAL: u32 = 90;
    pub const BRICK_SPAWN_Y: f32 = 4.2;
    /// Spawn x is `k + BRICK_SPAWN_X_BASE` for `k` in `0..BRICK_SPAWN_COLUMNS`
    pub const BRICK_SPAWN_COLUMNS: u32 = 7;
    pub const BRICK_SPAWN_X_BASE: f32 = 0.85 - 3.0;
    pub const BRICK_HALF_WIDTH: f32 = 0.125;
    pub const BRICK_HALF_HEIGHT: f32 = 0.15;

    /// Brick fall per tick
    pub const FALL_RATE_NORMAL: f32 = 0.007;
    pub const FALL_RATE_FAST: f32 = 0.1;
    pub const FALL_RATE_SLOW: f32 = 0.002;

    /// Shooter and projectiles
    pub const FIRE_COOLDOWN_TICKS: u32 = 60;
    pub const SHOOTER_X: f32 = -3.75;
    pub const STAND_X: f32 = -3.875;
    pub const MUZZLE_X: f32 = -3.45;
    /// Vertical muzzle lift applied as `sin(aim) * MUZZLE_LIFT`
    pub const MUZZLE_LIFT: f32 = 0.45;
    pub const PROJECTILE_SPEED: f32 = 0.1;

    /// Baskets
    pub const BASKET_Y: f32 = -3.4;
    pub const LEFT_BASKET_HOME_X: f32 = -2.0;
    pub const RIGHT_BASKET_HOME_X: f32 = 2.0;
    pub const CATCH_HALF_WIDTH: f32 = 0.5;
    pub const CATCH_BAND_TOP: f32 = -2.82;
    pub const CATCH_BAND_BOTTOM: f32 = -2.85;

    /// Control steps and soft-clamp bounds (exclusive)
    pub const BASKET_STEP: f32 = 0.2;
    pub const BASKET_MIN_X: f32 = -2.0;
    pub const BASKET_MAX_X: f32 = 3.5;
    pub const SHOOTER_STEP: f32 = 0.2;
    pub const SHOOTER_MAX_Y: f32 = 3.75;
    pub const AIM_STEP_DEG: f32 = 5.0;
    pub const AIM_MAX_DEG: f32 = 80.0;

    /// Camera
    pub const ZOOM_STEP: f32 = 0.1;
    pub const PAN_STEP: f32 = 0.1;
    pub const MIN_ZOOM: f32 = -3.5;

    /// Fixed simulation rate when decoupled from the display
    pub const DEFAULT_TICK_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Unit direction for an angle in degrees (counter-clockwise from +X)
#[inline]
pub fn direction_deg(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_deg() {
        let d = direction_deg(90.0);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
        assert!((direction_deg(0.0) - Vec2::X).length() < 1e-6);
    }
}
