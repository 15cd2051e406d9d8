use std::time::{Duration, Instant};

/// Default frame interval, ~60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Decides when the runtime may issue the next redraw.
///
/// Frames are spaced at least `interval` apart. A stall does not queue a
/// burst of catch-up frames: the next deadline restarts from the late frame.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    /// True when a frame is due at `now`; the deadline then moves one
    /// interval ahead.
    pub fn ready_for_frame(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            Some(next) => {
                let after = next + self.interval;
                self.next = Some(if after > now { after } else { now + self.interval });
                true
            }
            None => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }

    /// Instant the loop should wake for the next frame, once one was issued.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_frame_is_immediate() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now();

        assert_eq!(pacer.next_deadline(), None);
        assert!(pacer.ready_for_frame(t0));
        assert_eq!(pacer.next_deadline(), Some(t0 + 16 * MS));
    }

    #[test]
    fn early_wakeups_do_not_issue_frames() {
        let mut pacer = FramePacer::default();
        let t0 = Instant::now();
        assert!(pacer.ready_for_frame(t0));

        // A busy loop polling every millisecond gets one frame per interval.
        let frames = (1..=64).filter(|k| pacer.ready_for_frame(t0 + *k * MS)).count();

        assert_eq!(frames, 4);
        assert_eq!(pacer.next_deadline(), Some(t0 + 80 * MS));
    }

    #[test]
    fn stall_does_not_burst() {
        let mut pacer = FramePacer::new(10 * MS);
        let t0 = Instant::now();
        assert!(pacer.ready_for_frame(t0));

        let late = t0 + 55 * MS;
        assert!(pacer.ready_for_frame(late));
        assert_eq!(pacer.next_deadline(), Some(late + 10 * MS));
        assert!(!pacer.ready_for_frame(late + MS));
    }

    #[test]
    fn on_time_frames_keep_cadence() {
        let mut pacer = FramePacer::new(10 * MS);
        let t0 = Instant::now();
        assert!(pacer.ready_for_frame(t0));

        // Waking 2 ms late does not shift later deadlines.
        assert!(pacer.ready_for_frame(t0 + 12 * MS));
        assert_eq!(pacer.next_deadline(), Some(t0 + 20 * MS));
    }
}
