use std::time::{Duration, Instant};

/// Fixed-interval cadence for streaming loops.
///
/// Deadlines advance by the interval rather than by `now + interval`, so the
/// cadence does not drift with per-frame processing time. A tick that misses
/// its deadline does not trigger a burst of catch-up frames; the schedule is
/// re-anchored instead.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    next: Option<Instant>,
}

impl Pacer {
    /// Create a pacer with an explicit inter-frame interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Create a pacer targeting a frame rate.
    ///
    /// Returns `None` for rates that are not finite and positive.
    pub fn from_fps(fps: f64) -> Option<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return None;
        }
        Some(Self::new(Duration::from_secs_f64(1.0 / fps)))
    }

    /// The configured inter-frame interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick deadline.
    ///
    /// The first call starts the schedule: it sleeps one full interval from
    /// now. Subsequent calls sleep until the deadline advances past `now`.
    pub fn pause(&mut self) {
        let now = Instant::now();
        let deadline = self.next.unwrap_or_else(|| now + self.interval);

        if deadline > now {
            std::thread::sleep(deadline - now);
        }

        // Re-anchor if we fell behind by more than one interval.
        let now = Instant::now();
        let mut following = deadline + self.interval;
        if following < now {
            following = now + self.interval;
        }
        self.next = Some(following);
    }
}
