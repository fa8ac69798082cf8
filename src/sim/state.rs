//! Game session state and core simulation types
//!
//! The host owns one `GameState` and passes it to `tick` and to the
//! renderer. Score, life and the control offsets are only changed by `tick`.

use glam::{Mat4, Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Basket;
use super::registry::{BrickClass, EntityId, Registry};
use crate::consts::*;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Life reached zero
    LivesExhausted,
    /// A black brick landed in a basket
    HazardCaught { basket: Basket },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal; further ticks are no-ops
    GameOver(GameOverCause),
}

/// Something that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BrickSpawned { id: EntityId, class: BrickClass, x: f32 },
    ProjectileFired { id: EntityId, angle_deg: f32 },
    BrickShot { brick: EntityId, projectile: EntityId, class: BrickClass },
    /// `mirror` is the zero-based index into `MIRRORS`
    ProjectileReflected { id: EntityId, mirror: usize, angle_deg: f32 },
    BrickCaught { id: EntityId, class: BrickClass, basket: Basket },
    GameOver(GameOverCause),
}

impl GameEvent {
    /// Whether the event changed score or life
    pub fn is_scoring(&self) -> bool {
        matches!(self, GameEvent::BrickShot { .. } | GameEvent::BrickCaught { .. })
    }
}

/// Player-controlled offsets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Controls {
    /// Left (red) basket offset from its home x
    pub left_basket: f32,
    /// Right (green) basket offset from its home x
    pub right_basket: f32,
    /// Shooter vertical position
    pub shooter_y: f32,
    /// Shooter aim in degrees
    pub aim_deg: f32,
}

impl Controls {
    pub fn left_basket_x(&self) -> f32 {
        LEFT_BASKET_HOME_X + self.left_basket
    }

    pub fn right_basket_x(&self) -> f32 {
        RIGHT_BASKET_HOME_X + self.right_basket
    }

    pub fn basket_x(&self, basket: Basket) -> f32 {
        match basket {
            Basket::Left => self.left_basket_x(),
            Basket::Right => self.right_basket_x(),
        }
    }

    /// Where a projectile fired now would start
    pub fn muzzle(&self) -> Vec2 {
        let lift = self.aim_deg.to_radians().sin() * MUZZLE_LIFT;
        Vec2::new(MUZZLE_X, self.shooter_y + lift)
    }

    /// Step every offset back inside its bounds by its own increment
    pub fn soft_clamp(&mut self) {
        soft_clamp_center(&mut self.left_basket, LEFT_BASKET_HOME_X);
        soft_clamp_center(&mut self.right_basket, RIGHT_BASKET_HOME_X);
        soft_clamp(&mut self.shooter_y, -SHOOTER_MAX_Y, SHOOTER_MAX_Y, SHOOTER_STEP);
        soft_clamp(&mut self.aim_deg, -AIM_MAX_DEG, AIM_MAX_DEG, AIM_STEP_DEG);
    }

    /// Whether every offset is strictly inside its bounds
    pub fn in_bounds(&self) -> bool {
        let inside = |v: f32, lo: f32, hi: f32| v > lo && v < hi;
        inside(self.left_basket_x(), BASKET_MIN_X, BASKET_MAX_X)
            && inside(self.right_basket_x(), BASKET_MIN_X, BASKET_MAX_X)
            && inside(self.shooter_y, -SHOOTER_MAX_Y, SHOOTER_MAX_Y)
            && inside(self.aim_deg, -AIM_MAX_DEG, AIM_MAX_DEG)
    }
}

fn soft_clamp_center(offset: &mut f32, home: f32) {
    let mut center = home + *offset;
    soft_clamp(&mut center, BASKET_MIN_X, BASKET_MAX_X, BASKET_STEP);
    *offset = center - home;
}

/// Reverse by `step` while at or past a bound
///
/// Values more than one step out snap to the bound first. Far from zero an
/// f32 subtraction of `step` no longer changes the value.
fn soft_clamp(value: &mut f32, min: f32, max: f32, step: f32) {
    if *value > max + step {
        *value = max;
    } else if *value < min - step {
        *value = min;
    }
    while *value >= max {
        *value -= step;
    }
    while *value <= min {
        *value += step;
    }
}

/// Camera pan/zoom, independent of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f32,
    pub pan: f32,
}

impl Camera {
    pub fn projection(&self) -> Mat4 {
        let e = VIEW_HALF_EXTENT + self.zoom;
        Mat4::orthographic_rh_gl(-e + self.pan, e + self.pan, -e, e, 0.1, 500.0)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// End-of-session summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReport {
    pub seed: u64,
    pub score: i32,
    pub life: i32,
    pub ticks: u64,
    pub cause: Option<GameOverCause>,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) score: i32,
    pub(crate) life: i32,
    pub(crate) phase: GamePhase,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// Ticks since the last brick spawn
    pub(crate) spawn_counter: u32,
    /// Ticks since the last shot
    pub(crate) fire_counter: u32,
    pub(crate) controls: Controls,
    pub(crate) camera: Camera,
    pub(crate) registry: Registry,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            life: INITIAL_LIFE,
            phase: GamePhase::Playing,
            time_ticks: 0,
            spawn_counter: 0,
            fire_counter: 0,
            controls: Controls::default(),
            camera: Camera::default(),
            registry: Registry::new(),
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn report(&self) -> GameReport {
        GameReport {
            seed: self.seed,
            score: self.score,
            life: self.life,
            ticks: self.time_ticks,
            cause: match self.phase {
                GamePhase::GameOver(cause) => Some(cause),
                GamePhase::Playing => None,
            },
        }
    }

    /// Enter the terminal phase (first cause wins)
    pub(crate) fn end(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver(cause);
            self.events.push(GameEvent::GameOver(cause));
        }
    }
}
