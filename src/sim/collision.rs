//! Collision tests and scoring rules
//!
//! All tests are inclusive on their edges, matching how the bricks, catch
//! windows and mirror bands were tuned.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::BrickClass;
use crate::consts::*;

/// Which basket caught a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Basket {
    /// Red basket, home at x = -2
    Left,
    /// Green basket, home at x = +2
    Right,
}

/// Effect of a collision on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Score(i32),
    Life(i32),
    /// Ends the session immediately
    Fatal,
}

/// Axis-aligned box test for a brick centred at `center`
#[inline]
pub fn brick_contains(center: Vec2, point: Vec2) -> bool {
    point.x >= center.x - BRICK_HALF_WIDTH
        && point.x <= center.x + BRICK_HALF_WIDTH
        && point.y >= center.y - BRICK_HALF_HEIGHT
        && point.y <= center.y + BRICK_HALF_HEIGHT
}

/// Whether a brick at `pos`, which fell `last_fall` to get there, passed
/// through the catch window of a basket centred at `basket_x`
pub fn in_catch_window(pos: Vec2, last_fall: f32, basket_x: f32) -> bool {
    let in_x = pos.x >= basket_x - CATCH_HALF_WIDTH && pos.x <= basket_x + CATCH_HALF_WIDTH;
    // Swept span covered by the last fall step
    let span_bottom = pos.y;
    let span_top = pos.y + last_fall.max(0.0);
    in_x && span_bottom <= CATCH_BAND_TOP && span_top >= CATCH_BAND_BOTTOM
}

/// Outcome of a projectile striking a brick
///
/// Shooting a red or green brick costs a life; only black bricks are worth
/// shooting.
pub fn shot_outcome(class: BrickClass) -> Outcome {
    match class {
        BrickClass::Red | BrickClass::Green => Outcome::Life(-1),
        BrickClass::Black => Outcome::Score(1),
    }
}

/// Outcome of a basket catching a brick
pub fn catch_outcome(class: BrickClass, basket: Basket) -> Outcome {
    match (class, basket) {
        (BrickClass::Black, _) => Outcome::Fatal,
        (BrickClass::Red, Basket::Left) | (BrickClass::Green, Basket::Right) => Outcome::Score(1),
        (BrickClass::Red, Basket::Right) | (BrickClass::Green, Basket::Left) => Outcome::Score(-1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_contains_edges() {
        let c = Vec2::new(1.0, 2.0);
        assert!(brick_contains(c, c));
        assert!(brick_contains(c, Vec2::new(1.125, 2.15)));
        assert!(brick_contains(c, Vec2::new(0.875, 1.85)));
        assert!(!brick_contains(c, Vec2::new(1.13, 2.0)));
        assert!(!brick_contains(c, Vec2::new(1.0, 1.84)));
    }

    #[test]
    fn test_catch_window_point() {
        // Resting inside the band with no recent fall
        assert!(in_catch_window(Vec2::new(-2.0, -2.83), 0.0, -2.0));
        assert!(in_catch_window(Vec2::new(-1.5, -2.83), 0.0, -2.0));
        assert!(!in_catch_window(Vec2::new(-1.4, -2.83), 0.0, -2.0));
        assert!(!in_catch_window(Vec2::new(-2.0, -2.7), 0.0, -2.0));
        assert!(!in_catch_window(Vec2::new(-2.0, -2.9), 0.0, -2.0));
    }

    #[test]
    fn test_catch_window_swept_fast_fall() {
        // A 0.1 step from -2.78 to -2.88 jumps over the 0.03 band
        assert!(in_catch_window(Vec2::new(2.0, -2.88), 0.1, 2.0));
        // Already below the band before the step
        assert!(!in_catch_window(Vec2::new(2.0, -2.96), 0.1, 2.0));
    }

    #[test]
    fn test_shot_outcome_table() {
        assert_eq!(shot_outcome(BrickClass::Red), Outcome::Life(-1));
        assert_eq!(shot_outcome(BrickClass::Green), Outcome::Life(-1));
        assert_eq!(shot_outcome(BrickClass::Black), Outcome::Score(1));
    }

    #[test]
    fn test_catch_outcome_table() {
        assert_eq!(catch_outcome(BrickClass::Red, Basket::Left), Outcome::Score(1));
        assert_eq!(catch_outcome(BrickClass::Red, Basket::Right), Outcome::Score(-1));
        assert_eq!(catch_outcome(BrickClass::Green, Basket::Left), Outcome::Score(-1));
        assert_eq!(catch_outcome(BrickClass::Green, Basket::Right), Outcome::Score(1));
        assert_eq!(catch_outcome(BrickClass::Black, Basket::Left), Outcome::Fatal);
        assert_eq!(catch_outcome(BrickClass::Black, Basket::Right), Outcome::Fatal);
    }
}
