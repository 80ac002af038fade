//! Fixed-rate animation clock.
//!
//! Rotation and star flicker are defined per 60 Hz step, so the render loop
//! asks the clock how many steps a frame owes instead of scaling by the raw
//! frame time. Slow frames are clamped rather than replayed in full.

use std::time::Instant;

use tracing::warn;

/// Fixed animation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time credited to the accumulator (4 FPS).
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug, Default)]
pub struct FrameClock {
    previous: Option<Instant>,
    accumulator: f64,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame ending at `now` and return how many fixed steps to run.
    ///
    /// The first frame owes exactly one step so the scene is animated from
    /// the very first present.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let steps = match self.previous {
            Some(previous) => self.accumulate(now.saturating_duration_since(previous).as_secs_f64()),
            None => {
                self.step_count += 1;
                1
            }
        };
        self.previous = Some(now);
        self.frame_count += 1;
        steps
    }

    fn accumulate(&mut self, frame_time: f64) -> u32 {
        let frame_time = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
        self.step_count += u64::from(steps);
        steps
    }

    /// Fraction of a step carried into the next frame, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / FIXED_DT
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Instant::now()), 1);
        assert_eq!(clock.frame_count(), 1);
        assert_eq!(clock.step_count(), 1);
    }

    #[test]
    fn test_whole_steps_are_owed() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.accumulate(3.0 * FIXED_DT + 1e-9), 3);
        assert!(clock.alpha() < 1e-6);
    }

    #[test]
    fn test_partial_step_carries_over() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.accumulate(0.5 * FIXED_DT), 0);
        assert!((clock.alpha() - 0.5).abs() < 1e-9);
        assert_eq!(clock.accumulate(0.5 * FIXED_DT + 1e-9), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        let steps = clock.accumulate(2.0);
        let max_steps = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(steps > 0 && steps <= max_steps, "{steps}");
    }

    #[test]
    fn test_tick_measures_between_frames() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(start);
        let steps = clock.tick(start + Duration::from_millis(55));
        assert_eq!(steps, 3);
        assert_eq!(clock.step_count(), 4);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut clock = FrameClock::new();
        let start = Instant::now() + Duration::from_secs(1);
        clock.tick(start);
        assert_eq!(clock.tick(start - Duration::from_millis(500)), 0);
    }
}
