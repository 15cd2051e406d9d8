use std::time::{Duration, Instant};

/// Units the fixed-step clock advances per tick (≈ one 60 Hz frame in ms).
pub const DEFAULT_STEP: f32 = 16.0;

/// How the animation timer advances on each tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TimeStep {
    /// Advance by a constant amount regardless of real time.
    ///
    /// Animation speed scales with the host's frame rate.
    Fixed(f32),

    /// Advance by measured wall-clock milliseconds since the previous tick,
    /// clamped to `[min, max]`.
    Measured { min: Duration, max: Duration },
}

impl TimeStep {
    /// Measured stepping with the default clamps.
    ///
    /// The minimum keeps tight loops from producing zero steps; the maximum
    /// stops a debugger pause or minimized window from jumping the animation.
    pub fn measured() -> Self {
        Self::Measured {
            min: Duration::from_micros(100),
            max: Duration::from_millis(250),
        }
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        Self::Fixed(DEFAULT_STEP)
    }
}

/// Snapshot taken at a tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Accumulated timer value after this tick.
    pub elapsed: f32,

    /// Amount added by this tick.
    pub step: f32,

    /// Zero-based index of this tick.
    pub frame_index: u64,
}

/// Animation timer owned by one render driver.
///
/// The accumulator only ever grows; it is never reset for the lifetime of the
/// driver. `f32` precision loss after very long runs is accepted.
#[derive(Debug, Copy, Clone)]
pub struct FrameClock {
    step: TimeStep,
    elapsed: f32,
    frame_index: u64,
    last: Instant,
}

impl FrameClock {
    pub fn new(step: TimeStep) -> Self {
        if let TimeStep::Measured { min, max } = step {
            debug_assert!(min <= max);
        }
        Self {
            step,
            elapsed: 0.0,
            frame_index: 0,
            last: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Advances the timer and returns the new snapshot.
    pub fn tick(&mut self) -> FrameTime {
        let step = match self.step {
            TimeStep::Fixed(units) => units,
            TimeStep::Measured { min, max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(self.last).clamp(min, max);
                self.last = now;
                dt.as_secs_f32() * 1000.0
            }
        };

        self.elapsed += step;

        let ft = FrameTime {
            elapsed: self.elapsed,
            step,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TimeStep::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_accumulates_exactly() {
        let mut clock = FrameClock::default();
        for k in 1..=10u32 {
            let ft = clock.tick();
            assert_eq!(ft.elapsed, 16.0 * k as f32);
            assert_eq!(ft.step, 16.0);
            assert_eq!(ft.frame_index, u64::from(k - 1));
        }
        assert_eq!(clock.frame_count(), 10);
    }

    #[test]
    fn custom_fixed_step() {
        let mut clock = FrameClock::new(TimeStep::Fixed(2.5));
        clock.tick();
        clock.tick();
        assert_eq!(clock.elapsed(), 5.0);
    }

    #[test]
    fn measured_step_is_clamped() {
        let min = Duration::from_millis(5);
        let max = Duration::from_millis(10);
        let mut clock = FrameClock::new(TimeStep::Measured { min, max });

        // Back-to-back ticks are far shorter than `min`.
        let ft = clock.tick();
        assert!(ft.step >= 5.0 - 1e-3);
        assert!(ft.step <= 10.0 + 1e-3);

        std::thread::sleep(Duration::from_millis(30));
        let ft = clock.tick();
        assert!((ft.step - 10.0).abs() < 1e-3);
    }
}
