use std::time::{Duration, Instant};

/// Result of advancing a [`FixedClock`].
#[derive(Debug, Copy, Clone)]
pub struct StepBatch {
    /// Whole simulation steps to run this frame.
    pub steps: u32,
    /// Fraction of a step left in the accumulator, in `[0, 1)`. Usable for
    /// render interpolation between the last two simulated states.
    pub alpha: f32,
}

/// Fixed-timestep clock.
///
/// Wall-clock time accumulates across ticks and is drained in whole steps of
/// a fixed duration, so the simulation advances by the same increments
/// regardless of frame rate. Per-tick delta time is clamped so a debugger
/// pause or a minimized window cannot queue an unbounded burst of steps.
#[derive(Debug, Clone)]
pub struct FixedClock {
    step: Duration,
    last: Instant,
    accumulator: Duration,
    dt_max: Duration,
    step_index: u64,
}

impl FixedClock {
    /// Creates a clock draining in steps of `step`.
    pub fn new(step: Duration) -> Self {
        debug_assert!(!step.is_zero());
        Self {
            step,
            last: Instant::now(),
            accumulator: Duration::ZERO,
            dt_max: Duration::from_millis(250),
            step_index: 0,
        }
    }

    /// Clock stepping at `hz` simulation updates per second.
    pub fn from_hz(hz: u32) -> Self {
        debug_assert!(hz > 0);
        Self::new(Duration::from_secs(1) / hz)
    }

    /// Overrides the per-tick delta clamp.
    pub fn with_dt_clamp(mut self, dt_max: Duration) -> Self {
        debug_assert!(dt_max >= self.step);
        self.dt_max = dt_max;
        self
    }

    /// Rebaselines the clock and drops pending accumulated time.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.accumulator = Duration::ZERO;
    }

    /// Samples the wall clock and advances.
    pub fn tick(&mut self) -> StepBatch {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(dt)
    }

    /// Accumulator core, separated from wall-clock sampling so it can be
    /// driven with synthetic deltas.
    pub fn advance(&mut self, dt: Duration) -> StepBatch {
        let dt = dt.min(self.dt_max);
        self.accumulator += dt;

        let mut steps = 0u32;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        self.step_index += u64::from(steps);

        StepBatch {
            steps,
            alpha: self.accumulator.as_secs_f32() / self.step.as_secs_f32(),
        }
    }

    /// Total simulation steps produced since construction.
    #[inline]
    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    /// The fixed step duration.
    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_10ms() -> FixedClock {
        FixedClock::new(Duration::from_millis(10))
    }

    #[test]
    fn zero_delta_produces_no_steps() {
        let mut clock = clock_10ms();
        let batch = clock.advance(Duration::ZERO);
        assert_eq!(batch.steps, 0);
        assert_eq!(batch.alpha, 0.0);
    }

    #[test]
    fn whole_steps_drain_the_accumulator() {
        let mut clock = clock_10ms();
        let batch = clock.advance(Duration::from_millis(35));
        assert_eq!(batch.steps, 3);
        assert!((batch.alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn remainder_carries_across_ticks() {
        let mut clock = clock_10ms();
        assert_eq!(clock.advance(Duration::from_millis(6)).steps, 0);
        // 6ms + 6ms crosses one 10ms step with 2ms left over.
        let batch = clock.advance(Duration::from_millis(6));
        assert_eq!(batch.steps, 1);
        assert!((batch.alpha - 0.2).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = clock_10ms();
        // 10 s of stall, clamped to the default 250 ms.
        let batch = clock.advance(Duration::from_secs(10));
        assert_eq!(batch.steps, 25);
    }

    #[test]
    fn custom_clamp_bounds_the_burst() {
        let mut clock = clock_10ms().with_dt_clamp(Duration::from_millis(30));
        let batch = clock.advance(Duration::from_secs(1));
        assert_eq!(batch.steps, 3);
    }

    #[test]
    fn step_index_accumulates() {
        let mut clock = clock_10ms();
        clock.advance(Duration::from_millis(25));
        clock.advance(Duration::from_millis(25));
        assert_eq!(clock.step_index(), 5);
    }

    #[test]
    fn reset_drops_pending_time() {
        let mut clock = clock_10ms();
        clock.advance(Duration::from_millis(9));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(9)).steps, 0);
    }

    #[test]
    fn from_hz_step_duration() {
        let clock = FixedClock::from_hz(60);
        assert_eq!(clock.step(), Duration::from_secs(1) / 60);
    }
}
