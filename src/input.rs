//! Keyboard sampling
//!
//! The host forwards key events (press and auto-repeat) to `key_event`, which
//! turns the current key combination into control nudges. Once per tick
//! `sample` drains those nudges and adds the held-key state (fire and fall
//! speed) to build the `TickInput`.

use std::collections::HashSet;

use crate::sim::{FallSpeed, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    LeftShift,
    LeftAlt,
    S,
    F,
    A,
    D,
    Space,
    N,
    M,
    Q,
}

/// Anything that can report whether a key is currently held
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// In-memory set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    down: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with exactly `keys` held
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            down: keys.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }
}

impl InputSource for KeyState {
    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

/// Accumulates nudges between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    pending: TickInput,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one key event given the keys held at that moment
    pub fn key_event(&mut self, keys: &impl InputSource) {
        let down = |k| keys.is_key_down(k);
        let shift = down(Key::LeftShift);
        let alt = down(Key::LeftAlt);
        let p = &mut self.pending;

        if shift && down(Key::Right) {
            p.left_basket += 1;
        }
        if shift && down(Key::Left) {
            p.left_basket -= 1;
        }
        if alt && down(Key::Right) {
            p.right_basket += 1;
        }
        if alt && down(Key::Left) {
            p.right_basket -= 1;
        }

        if down(Key::S) {
            p.shooter += 1;
        }
        if down(Key::F) {
            p.shooter -= 1;
        }
        if down(Key::A) {
            p.aim += 1;
        }
        if down(Key::D) {
            p.aim -= 1;
        }
        if down(Key::Up) {
            p.zoom -= 1;
        }

        // Pan only when the arrows are not steering a basket, and never in
        // the same event as zoom-out
        if down(Key::Down) {
            p.zoom += 1;
        } else if down(Key::Left) && !shift && !alt {
            p.pan -= 1;
        } else if down(Key::Right) && !shift && !alt {
            p.pan += 1;
        }
    }

    /// Build the input for the next tick and reset accumulated nudges
    pub fn sample(&mut self, keys: &impl InputSource) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.fire = keys.is_key_down(Key::Space);
        input.fall = if keys.is_key_down(Key::N) {
            FallSpeed::Fast
        } else if keys.is_key_down(Key::M) {
            FallSpeed::Slow
        } else {
            FallSpeed::Normal
        };
        input
    }

    pub fn quit_requested(keys: &impl InputSource) -> bool {
        keys.is_key_down(Key::Q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(keys: &[Key]) -> TickInput {
        let mut sampler = InputSampler::new();
        let state = KeyState::with_keys(keys);
        sampler.key_event(&state);
        sampler.sample(&KeyState::new())
    }

    #[test]
    fn test_basket_modifiers() {
        let i = event(&[Key::LeftShift, Key::Right]);
        assert_eq!((i.left_basket, i.right_basket, i.pan), (1, 0, 0));

        let i = event(&[Key::LeftAlt, Key::Left]);
        assert_eq!((i.left_basket, i.right_basket, i.pan), (0, -1, 0));
    }

    #[test]
    fn test_plain_arrows_pan() {
        assert_eq!(event(&[Key::Left]).pan, -1);
        assert_eq!(event(&[Key::Right]).pan, 1);
    }

    #[test]
    fn test_zoom_out_suppresses_pan() {
        let i = event(&[Key::Down, Key::Left]);
        assert_eq!(i.zoom, 1);
        assert_eq!(i.pan, 0);

        // Zoom-in does not
        let i = event(&[Key::Up, Key::Left]);
        assert_eq!(i.zoom, -1);
        assert_eq!(i.pan, -1);
    }

    #[test]
    fn test_shooter_and_aim() {
        let i = event(&[Key::S, Key::A]);
        assert_eq!((i.shooter, i.aim), (1, 1));
        let i = event(&[Key::F, Key::D]);
        assert_eq!((i.shooter, i.aim), (-1, -1));
    }

    #[test]
    fn test_nudges_accumulate_until_sampled() {
        let mut sampler = InputSampler::new();
        let keys = KeyState::with_keys(&[Key::A]);
        sampler.key_event(&keys);
        sampler.key_event(&keys);
        sampler.key_event(&keys);

        assert_eq!(sampler.sample(&keys).aim, 3);
        assert_eq!(sampler.sample(&keys).aim, 0);
    }

    #[test]
    fn test_held_keys() {
        let mut sampler = InputSampler::new();
        let i = sampler.sample(&KeyState::with_keys(&[Key::Space, Key::N, Key::M]));
        assert!(i.fire);
        assert_eq!(i.fall, FallSpeed::Fast, "fast fall wins over slow");

        let i = sampler.sample(&KeyState::with_keys(&[Key::M]));
        assert!(!i.fire);
        assert_eq!(i.fall, FallSpeed::Slow);
    }

    #[test]
    fn test_release() {
        let mut keys = KeyState::new();
        keys.press(Key::Space);
        keys.release(Key::Space);
        assert!(keys.is_empty());
    }

    #[test]
    fn test_quit() {
        assert!(InputSampler::quit_requested(&KeyState::with_keys(&[Key::Q])));
        assert!(!InputSampler::quit_requested(&KeyState::new()));
    }
}
