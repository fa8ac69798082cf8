//! Demo player for unattended runs
//!
//! Produces the keys a player would hold this frame. Baskets chase bricks of
//! their own colour and dodge black ones; the shooter tracks the lowest
//! black brick and fires once the shot would meet it.

use crate::consts::*;
use crate::input::{Key, KeyState};
use crate::sim::{Basket, Brick, BrickClass, GameState};

/// Bricks closer than this to a basket's centre are treated as incoming
const DODGE_MARGIN: f32 = CATCH_HALF_WIDTH + 0.2;
/// Only dodge bricks that are already this low
const DODGE_HEIGHT: f32 = -1.0;
const BASKET_DEADBAND: f32 = 0.15;
const SHOOTER_DEADBAND: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frame: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys to hold for the current frame
    pub fn keys(&mut self, state: &GameState) -> KeyState {
        self.frame += 1;
        let mut keys = KeyState::new();

        // Shift and Alt share the arrow keys, so steer one basket per frame
        let basket = if self.frame % 2 == 0 {
            Basket::Left
        } else {
            Basket::Right
        };
        if let Some(right) = steer_basket(state, basket) {
            keys.press(match basket {
                Basket::Left => Key::LeftShift,
                Basket::Right => Key::LeftAlt,
            });
            keys.press(if right { Key::Right } else { Key::Left });
        }

        let controls = state.controls();
        if controls.aim_deg > 0.0 {
            keys.press(Key::D);
        } else if controls.aim_deg < 0.0 {
            keys.press(Key::A);
        }

        if let Some(target_y) = shot_target(state) {
            let diff = target_y - controls.shooter_y;
            if diff > SHOOTER_DEADBAND {
                keys.press(Key::S);
            } else if diff < -SHOOTER_DEADBAND {
                keys.press(Key::F);
            } else {
                keys.press(Key::Space);
            }
        }

        keys
    }
}

fn lowest<'a>(state: &'a GameState, class: BrickClass) -> Option<&'a Brick> {
    state
        .registry()
        .bricks()
        .filter(|b| b.class == class)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
}

/// Direction to move `basket` (true = right), or None to stay put
fn steer_basket(state: &GameState, basket: Basket) -> Option<bool> {
    let x = state.controls().basket_x(basket);

    let threat = state.registry().bricks().find(|b| {
        b.class == BrickClass::Black
            && b.pos.y < DODGE_HEIGHT
            && b.pos.y > CATCH_BAND_BOTTOM
            && (b.pos.x - x).abs() <= DODGE_MARGIN
    });
    if let Some(black) = threat {
        // Soft clamp bounces us back if this runs into a wall
        return Some(black.pos.x < x);
    }

    let wanted = match basket {
        Basket::Left => BrickClass::Red,
        Basket::Right => BrickClass::Green,
    };
    let target = lowest(state, wanted).filter(|b| b.pos.y > CATCH_BAND_BOTTOM)?;
    let diff = target.pos.x - x;
    (diff.abs() > BASKET_DEADBAND).then_some(diff > 0.0)
}

/// Shooter height that meets the lowest black brick, leading its fall
fn shot_target(state: &GameState) -> Option<f32> {
    let black = lowest(state, BrickClass::Black).filter(|b| b.pos.x > MUZZLE_X)?;
    let flight_ticks = (black.pos.x - MUZZLE_X) / PROJECTILE_SPEED;
    let y = black.pos.y - FALL_RATE_NORMAL * flight_ticks;
    (y.abs() < SHOOTER_MAX_Y).then_some(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSampler, InputSource};
    use crate::sim::{Step, tick};
    use glam::Vec2;

    #[test]
    fn test_left_basket_chases_red() {
        let mut state = GameState::new(1);
        state.registry.spawn_brick(BrickClass::Red, Vec2::new(1.0, 2.0));

        let mut pilot = Autopilot::new();
        pilot.keys(&state); // odd frame steers the right basket
        let keys = pilot.keys(&state);
        assert!(keys.is_key_down(Key::LeftShift));
        assert!(keys.is_key_down(Key::Right));
    }

    #[test]
    fn test_basket_dodges_black() {
        let mut state = GameState::new(2);
        state.registry.spawn_brick(BrickClass::Black, Vec2::new(2.2, -2.0));
        state.registry.spawn_brick(BrickClass::Green, Vec2::new(2.2, 3.0));

        let mut pilot = Autopilot::new();
        let keys = pilot.keys(&state);
        assert!(keys.is_key_down(Key::LeftAlt));
        assert!(keys.is_key_down(Key::Left));
    }

    #[test]
    fn test_fires_when_aligned() {
        let mut state = GameState::new(3);
        state.registry.spawn_brick(BrickClass::Black, Vec2::new(1.0, 2.0));
        // Fall during the 44.5 tick flight brings the target to about 1.69
        state.controls.shooter_y = 1.7;

        let keys = Autopilot::new().keys(&state);
        assert!(keys.is_key_down(Key::Space));
        assert!(!keys.is_key_down(Key::S));
        assert!(!keys.is_key_down(Key::F));

        state.controls.shooter_y = 0.0;
        let keys = Autopilot::new().keys(&state);
        assert!(keys.is_key_down(Key::S));
        assert!(!keys.is_key_down(Key::Space));
    }

    #[test]
    fn test_levels_aim() {
        let mut state = GameState::new(4);
        state.controls.aim_deg = 15.0;
        assert!(Autopilot::new().keys(&state).is_key_down(Key::D));
        state.controls.aim_deg = -15.0;
        assert!(Autopilot::new().keys(&state).is_key_down(Key::A));
    }

    #[test]
    fn test_long_run_stays_consistent() {
        let mut state = GameState::new(2024);
        let mut pilot = Autopilot::new();
        let mut sampler = InputSampler::new();

        for _ in 0..5000 {
            let keys = pilot.keys(&state);
            sampler.key_event(&keys);
            let input = sampler.sample(&keys);
            if let Step::Finished(_) = tick(&mut state, &input) {
                break;
            }
            assert!(state.controls().in_bounds());
            assert!(state.registry().live_brick_count() < 16);
        }
        assert!(state.time_ticks() > 0);
    }
}
