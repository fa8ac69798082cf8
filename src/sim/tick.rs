//! Per-tick simulation step
//!
//! Core game loop that advances the session by one tick. One tick runs per
//! rendered frame unless the host decouples them (see `clock`).

use rand::Rng;

use super::collision::{Basket, Outcome, catch_outcome, in_catch_window, shot_outcome};
use super::mirror::find_deflecting;
use super::registry::BrickClass;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::*;

/// How fast bricks fall this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallSpeed {
    #[default]
    Normal,
    Fast,
    Slow,
}

impl FallSpeed {
    pub fn rate(self) -> f32 {
        match self {
            FallSpeed::Normal => FALL_RATE_NORMAL,
            FallSpeed::Fast => FALL_RATE_FAST,
            FallSpeed::Slow => FALL_RATE_SLOW,
        }
    }
}

/// Input commands for a single tick (deterministic)
///
/// Nudge fields count control steps accumulated since the previous tick
/// (positive = right/up/zoom-out).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_basket: i32,
    pub right_basket: i32,
    pub shooter: i32,
    pub aim: i32,
    pub zoom: i32,
    pub pan: i32,
    /// Fire key held
    pub fire: bool,
    pub fall: FallSpeed,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Running,
    Finished(GameOverCause),
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Step {
    if let GamePhase::GameOver(cause) = state.phase {
        return Step::Finished(cause);
    }

    state.time_ticks += 1;

    apply_nudges(state, input);
    spawn_bricks(state);
    fire(state, input);
    state.controls.soft_clamp();

    if let Some(cause) = shoot_bricks(state) {
        return finish(state, cause);
    }

    for projectile in state.registry.projectiles_mut() {
        projectile.advance();
    }
    reflect_projectiles(state);

    if let Some(cause) = catch_bricks(state) {
        return finish(state, cause);
    }

    let rate = input.fall.rate();
    for brick in state.registry.bricks_mut() {
        brick.pos.y -= rate;
        brick.last_fall = rate;
    }

    let removed = state.registry.despawn_out_of_bounds(PLAYFIELD_LIMIT);
    if removed > 0 {
        log::trace!("Despawned {} entities outside the playfield", removed);
    }
    state.registry.sweep();

    Step::Running
}

fn finish(state: &mut GameState, cause: GameOverCause) -> Step {
    state.end(cause);
    state.registry.sweep();
    match cause {
        GameOverCause::LivesExhausted => log::info!("Lives over! Game over"),
        GameOverCause::HazardCaught { basket } => {
            log::info!("Black brick in the {:?} basket! Game over", basket)
        }
    }
    Step::Finished(cause)
}

fn apply_nudges(state: &mut GameState, input: &TickInput) {
    let c = &mut state.controls;
    c.left_basket += input.left_basket as f32 * BASKET_STEP;
    c.right_basket += input.right_basket as f32 * BASKET_STEP;
    c.shooter_y += input.shooter as f32 * SHOOTER_STEP;
    c.aim_deg += input.aim as f32 * AIM_STEP_DEG;

    let cam = &mut state.camera;
    cam.zoom = (cam.zoom + input.zoom as f32 * ZOOM_STEP).max(MIN_ZOOM);
    cam.pan += input.pan as f32 * PAN_STEP;
}

fn spawn_bricks(state: &mut GameState) {
    state.spawn_counter += 1;
    if state.spawn_counter < BRICK_SPAWN_INTERVAL {
        return;
    }
    state.spawn_counter = 0;

    let column = state.rng.random_range(0..BRICK_SPAWN_COLUMNS);
    let class = BrickClass::ALL[state.rng.random_range(0..BrickClass::ALL.len())];
    let x = column as f32 + BRICK_SPAWN_X_BASE;

    let id = state
        .registry
        .spawn_brick(class, glam::Vec2::new(x, BRICK_SPAWN_Y));
    log::debug!("Spawned {:?} brick {:?} at x={:.2}", class, id, x);
    state.events.push(GameEvent::BrickSpawned { id, class, x });
}

fn fire(state: &mut GameState, input: &TickInput) {
    state.fire_counter = state.fire_counter.saturating_add(1);
    if !input.fire || state.fire_counter < FIRE_COOLDOWN_TICKS {
        return;
    }
    state.fire_counter = 0;

    let angle_deg = state.controls.aim_deg;
    let id = state
        .registry
        .spawn_projectile(state.controls.muzzle(), angle_deg);
    log::debug!("Fired projectile {:?} at {:.0} deg", id, angle_deg);
    state.events.push(GameEvent::ProjectileFired { id, angle_deg });
}

/// Apply a scoring outcome; returns the game-over cause if it ended the session
fn apply_outcome(
    state: &mut GameState,
    outcome: Outcome,
    fatal_cause: GameOverCause,
) -> Option<GameOverCause> {
    match outcome {
        Outcome::Score(delta) => state.score += delta,
        Outcome::Life(delta) => state.life += delta,
        Outcome::Fatal => return Some(fatal_cause),
    }
    log::info!("Score: {}  Life: {}", state.score, state.life);
    (state.life <= 0).then_some(GameOverCause::LivesExhausted)
}

/// Projectile vs brick. Each projectile can destroy at most one brick.
fn shoot_bricks(state: &mut GameState) -> Option<GameOverCause> {
    for pid in state.registry.projectile_ids() {
        let Some(pos) = state
            .registry
            .projectile(pid)
            .filter(|p| p.is_alive())
            .map(|p| p.position())
        else {
            continue;
        };
        let Some((bid, class)) = state.registry.brick_at(pos).map(|b| (b.id, b.class)) else {
            continue;
        };

        state.registry.despawn(bid);
        state.registry.despawn(pid);
        state.events.push(GameEvent::BrickShot {
            brick: bid,
            projectile: pid,
            class,
        });

        if let Some(cause) = apply_outcome(state, shot_outcome(class), GameOverCause::LivesExhausted)
        {
            return Some(cause);
        }
    }
    None
}

fn reflect_projectiles(state: &mut GameState) {
    for projectile in state.registry.projectiles_mut() {
        let pos = projectile.position();
        if let Some((mirror, m)) = find_deflecting(pos) {
            projectile.bounce(pos, m.turn_deg);
            log::debug!(
                "Projectile {:?} bounced off mirror {} -> {:.0} deg",
                projectile.id,
                mirror,
                projectile.angle_deg
            );
            state.events.push(GameEvent::ProjectileReflected {
                id: projectile.id,
                mirror,
                angle_deg: projectile.angle_deg,
            });
        }
    }
}

/// Brick vs basket. A brick is caught by at most one basket, left first.
fn catch_bricks(state: &mut GameState) -> Option<GameOverCause> {
    let left_x = state.controls.left_basket_x();
    let right_x = state.controls.right_basket_x();

    for bid in state.registry.brick_ids() {
        let Some((pos, last_fall, class)) = state
            .registry
            .brick(bid)
            .filter(|b| b.is_alive())
            .map(|b| (b.pos, b.last_fall, b.class))
        else {
            continue;
        };

        let basket = if in_catch_window(pos, last_fall, left_x) {
            Basket::Left
        } else if in_catch_window(pos, last_fall, right_x) {
            Basket::Right
        } else {
            continue;
        };

        state.registry.despawn(bid);
        state.events.push(GameEvent::BrickCaught { id: bid, class, basket });

        let outcome = catch_outcome(class, basket);
        if let Some(cause) = apply_outcome(state, outcome, GameOverCause::HazardCaught { basket }) {
            return Some(cause);
        }
    }
    None
}
