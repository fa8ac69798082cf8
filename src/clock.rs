//! Frame-to-tick pacing
//!
//! By default the simulation advances exactly one tick per rendered frame, so
//! game speed follows the frame rate. `Timestep::Fixed` decouples them with
//! an accumulator.

use std::time::Duration;

use crate::consts::{DEFAULT_TICK_HZ, MAX_SUBSTEPS};
use crate::settings::Timestep;

/// Longest frame the accumulator will absorb (seconds)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: Timestep,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(mode: Timestep) -> Self {
        Self {
            mode,
            accumulator: 0.0,
        }
    }

    /// How many ticks to run for a frame that took `dt` seconds
    pub fn ticks_for_frame(&mut self, dt: f32) -> u32 {
        let hz = match self.mode {
            Timestep::PerFrame => return 1,
            Timestep::Fixed { hz } => hz,
        };
        if hz <= 0.0 {
            return 0;
        }
        let step = 1.0 / hz;
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.accumulator -= step;
            substeps += 1;
        }
        substeps
    }

    /// Target wall-clock length of one frame when pacing in real time
    pub fn frame_budget(&self) -> Duration {
        let hz = match self.mode {
            Timestep::PerFrame => DEFAULT_TICK_HZ,
            Timestep::Fixed { hz } if hz > 0.0 => hz,
            Timestep::Fixed { .. } => DEFAULT_TICK_HZ,
        };
        Duration::try_from_secs_f32(1.0 / hz)
            .unwrap_or_else(|_| Duration::from_secs_f32(1.0 / DEFAULT_TICK_HZ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_always_one_tick() {
        let mut clock = FrameClock::new(Timestep::PerFrame);
        assert_eq!(clock.ticks_for_frame(0.0), 1);
        assert_eq!(clock.ticks_for_frame(0.5), 1);
    }

    #[test]
    fn test_fixed_accumulates() {
        let mut clock = FrameClock::new(Timestep::Fixed { hz: 60.0 });
        // Two 120 Hz frames make one tick
        assert_eq!(clock.ticks_for_frame(1.0 / 120.0), 0);
        assert_eq!(clock.ticks_for_frame(1.0 / 120.0 + 1e-4), 1);
        // A 30 Hz frame makes two
        assert_eq!(clock.ticks_for_frame(1.0 / 30.0), 2);
    }

    #[test]
    fn test_fixed_caps_substeps() {
        let mut clock = FrameClock::new(Timestep::Fixed { hz: 1000.0 });
        assert_eq!(clock.ticks_for_frame(5.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_frame_budget() {
        let clock = FrameClock::new(Timestep::Fixed { hz: 8.0 });
        assert_eq!(clock.frame_budget(), Duration::from_millis(125));
    }

    #[test]
    fn test_frame_budget_falls_back_when_unrepresentable() {
        let default = FrameClock::new(Timestep::PerFrame).frame_budget();
        for hz in [1e-30, f32::NAN, -5.0] {
            assert_eq!(FrameClock::new(Timestep::Fixed { hz }).frame_budget(), default);
        }
    }
}
